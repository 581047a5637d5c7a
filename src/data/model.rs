use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::Serialize;

/// Literal genre token left behind by header-like stray rows.
pub const GENRE_HEADER_SENTINEL: &str = "Genres";

pub const DEFAULT_STATUS: &str = "Unknown";
pub const DEFAULT_SYNOPSIS: &str = "No synopsis available";

// ---------------------------------------------------------------------------
// AiredRange – inclusive year interval
// ---------------------------------------------------------------------------

/// Inclusive interval of years during which an entry aired.
/// Always `start_year <= end_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AiredRange {
    start_year: i32,
    end_year: i32,
}

impl AiredRange {
    /// Build a range from two years, storing them in ascending order.
    pub fn new(a: i32, b: i32) -> Self {
        AiredRange {
            start_year: a.min(b),
            end_year: a.max(b),
        }
    }

    /// A range covering a single year.
    pub fn single(year: i32) -> Self {
        AiredRange::new(year, year)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }
}

impl fmt::Display for AiredRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_year == self.end_year {
            write!(f, "{}", self.start_year)
        } else {
            write!(f, "{}–{}", self.start_year, self.end_year)
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one normalized catalog entry
// ---------------------------------------------------------------------------

/// A single catalog entry after normalization. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    /// Nominally 0–10; unparseable input becomes `0.0`.
    pub rating: f64,
    /// Set when `rating` is the default rather than a parsed score.
    pub rating_defaulted: bool,
    pub genres: Vec<String>,
    pub status: String,
    pub episodes: u32,
    /// `None` when the aired field had no usable year.
    pub aired: Option<AiredRange>,
    pub synopsis: String,
}

impl Record {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn start_year(&self) -> Option<i32> {
        self.aired.map(|r| r.start_year())
    }
}

// ---------------------------------------------------------------------------
// Catalog – the records of one load
// ---------------------------------------------------------------------------

/// Counters collected while normalizing one input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_rejected: usize,
    pub fields_defaulted: usize,
    pub temporal_unavailable: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} rejected, {} fields defaulted, {} without air dates",
            self.rows_read, self.rows_rejected, self.fields_defaulted, self.temporal_unavailable
        )
    }
}

/// Immutable snapshot of a loaded catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub records: Arc<[Record]>,
    pub report: LoadReport,
}

impl Catalog {
    pub fn new(records: Vec<Record>, report: LoadReport) -> Self {
        Catalog {
            records: records.into(),
            report,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
