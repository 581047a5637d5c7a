//! Raw row → [`Record`] conversion.
//!
//! Bad numeric or date cells degrade the record to documented defaults
//! instead of discarding it. Only a blank name rejects a row.

use log::{debug, warn};
use thiserror::Error;

use super::model::{
    AiredRange, Catalog, LoadReport, Record, DEFAULT_STATUS, DEFAULT_SYNOPSIS,
};

const RANGE_SEPARATOR: &str = " to ";

// ---------------------------------------------------------------------------
// RawRow – one tabular row before typing
// ---------------------------------------------------------------------------

/// Fixed column order of positional input.
pub const COLUMN_ORDER: [Column; 7] = [
    Column::Name,
    Column::Rating,
    Column::Genres,
    Column::Synopsis,
    Column::Episodes,
    Column::Aired,
    Column::Status,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Rating,
    Genres,
    Synopsis,
    Episodes,
    Aired,
    Status,
}

impl Column {
    /// Match a header cell against the known column names (case-insensitive).
    pub fn from_header(header: &str) -> Option<Column> {
        match header.trim().to_ascii_lowercase().as_str() {
            "name" | "animename" | "title" => Some(Column::Name),
            "score" | "rating" => Some(Column::Rating),
            "genres" | "genre" => Some(Column::Genres),
            "synopsis" => Some(Column::Synopsis),
            "episodes" => Some(Column::Episodes),
            "aired" => Some(Column::Aired),
            "status" => Some(Column::Status),
            _ => None,
        }
    }
}

/// One untyped row. Cells the source did not provide are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub name: Option<String>,
    pub rating: Option<String>,
    pub genres: Option<String>,
    pub synopsis: Option<String>,
    pub episodes: Option<String>,
    pub aired: Option<String>,
    pub status: Option<String>,
}

impl RawRow {
    /// Build a row from cells in [`COLUMN_ORDER`]. Extra cells are ignored.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = RawRow::default();
        for (column, cell) in COLUMN_ORDER.iter().zip(cells) {
            row.set(*column, cell.into());
        }
        row
    }

    pub fn set(&mut self, column: Column, value: String) {
        let slot = match column {
            Column::Name => &mut self.name,
            Column::Rating => &mut self.rating,
            Column::Genres => &mut self.genres,
            Column::Synopsis => &mut self.synopsis,
            Column::Episodes => &mut self.episodes,
            Column::Aired => &mut self.aired,
            Column::Status => &mut self.status,
        };
        *slot = Some(value);
    }
}

// ---------------------------------------------------------------------------
// Row-level outcomes
// ---------------------------------------------------------------------------

/// Why a row could not become a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejected {
    #[error("row has no name")]
    MissingName,
}

/// Normalize a single row, also reporting how many fields fell back to a
/// default.
pub fn normalize_row(row: &RawRow) -> Result<(Record, usize), RowRejected> {
    let name = non_blank(row.name.as_deref())
        .ok_or(RowRejected::MissingName)?
        .to_string();

    let mut defaulted = 0;

    let (rating, rating_defaulted) = match row.rating.as_deref().and_then(parse_rating) {
        Some(v) => (v, false),
        None => {
            debug!("{name}: rating {:?} unparseable, using 0", row.rating);
            defaulted += 1;
            (0.0, true)
        }
    };

    let episodes = match row.episodes.as_deref().and_then(parse_episodes) {
        Some(n) => n,
        None => {
            debug!("{name}: episodes {:?} unparseable, using 0", row.episodes);
            defaulted += 1;
            0
        }
    };

    let aired = row.aired.as_deref().and_then(parse_aired);
    if aired.is_none() {
        debug!("{name}: aired {:?} has no year", row.aired);
        if non_blank(row.aired.as_deref()).is_some() {
            defaulted += 1;
        }
    }

    let record = Record {
        genres: row.genres.as_deref().map(split_genres).unwrap_or_default(),
        status: non_blank(row.status.as_deref())
            .unwrap_or(DEFAULT_STATUS)
            .to_string(),
        synopsis: non_blank(row.synopsis.as_deref())
            .unwrap_or(DEFAULT_SYNOPSIS)
            .to_string(),
        name,
        rating,
        rating_defaulted,
        episodes,
        aired,
    };
    Ok((record, defaulted))
}

/// Normalize a whole row collection into a [`Catalog`], dropping rejected
/// rows and tallying the outcome.
pub fn normalize_rows<I>(rows: I) -> Catalog
where
    I: IntoIterator<Item = RawRow>,
{
    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (row_no, row) in rows.into_iter().enumerate() {
        report.rows_read += 1;
        match normalize_row(&row) {
            Ok((record, defaulted)) => {
                report.fields_defaulted += defaulted;
                if record.aired.is_none() {
                    report.temporal_unavailable += 1;
                }
                records.push(record);
            }
            Err(e) => {
                warn!("Row {row_no} dropped: {e}");
                report.rows_rejected += 1;
            }
        }
    }

    Catalog::new(records, report)
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_rating(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_episodes(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    // Spreadsheet exports often write counts as "12.0".
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u32)
}

/// Split a comma-joined genre list, trimming entries and dropping empties.
pub fn split_genres(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `"<date> to <date>"` or a single date into a year range.
///
/// The end falls back to the start year when it is missing or has no year
/// (`"Apr 3, 2015 to ?"`). No start year means no range.
pub fn parse_aired(s: &str) -> Option<AiredRange> {
    let mut sides = s.splitn(2, RANGE_SEPARATOR);
    let start = sides.next().and_then(year_token)?;
    let range = match sides.next().and_then(year_token) {
        Some(end) => AiredRange::new(start, end),
        None => AiredRange::single(start),
    };
    Some(range)
}

/// First standalone 4-digit token in a date string.
fn year_token(s: &str) -> Option<i32> {
    s.split(|c: char| !c.is_ascii_digit())
        .find(|tok| tok.len() == 4)
        .and_then(|tok| tok.parse().ok())
}
