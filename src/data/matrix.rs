//! Genre × year average-rating matrix.
//!
//! Every record contributes its rating once per (year, genre) pair its aired
//! range and genre list span, so a three-year show counts three times for
//! each of its genres. Pairs nothing contributed to have no value at all,
//! which is not the same as an average of `0.0`.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

use serde::Serialize;

use super::model::{Record, GENRE_HEADER_SENTINEL};

/// One populated cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatrixCell<'a> {
    pub year: i32,
    pub genre: &'a str,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreYearMatrix {
    cells: BTreeMap<(i32, String), f64>,
    genres: Vec<String>,
    years: Option<RangeInclusive<i32>>,
}

impl GenreYearMatrix {
    /// Average rating for a pair, `None` when nothing aired in that slot.
    pub fn get(&self, year: i32, genre: &str) -> Option<f64> {
        // BTreeMap<(i32, String), _> can't be looked up with (i32, &str).
        self.cells.get(&(year, genre.to_string())).copied()
    }

    /// Populated cells ordered by year then genre.
    pub fn cells(&self) -> impl Iterator<Item = MatrixCell<'_>> + Clone + '_ {
        self.cells.iter().map(|((year, genre), value)| MatrixCell {
            year: *year,
            genre,
            value: *value,
        })
    }

    /// Genres that contributed to any cell, sorted.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Full year span of the contributing records, gaps included.
    pub fn year_domain(&self) -> Option<RangeInclusive<i32>> {
        self.years.clone()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Build the matrix from a record collection.
pub fn build_matrix(records: &[Record]) -> GenreYearMatrix {
    let mut samples: BTreeMap<(i32, String), Vec<f64>> = BTreeMap::new();
    let mut genres: BTreeSet<&str> = BTreeSet::new();
    let mut span: Option<(i32, i32)> = None;

    for rec in records {
        let Some(aired) = rec.aired else { continue };
        let rec_genres: Vec<&String> = rec
            .genres
            .iter()
            .filter(|g| *g != GENRE_HEADER_SENTINEL)
            .collect();
        if rec_genres.is_empty() {
            continue;
        }

        span = Some(match span {
            Some((lo, hi)) => (lo.min(aired.start_year()), hi.max(aired.end_year())),
            None => (aired.start_year(), aired.end_year()),
        });

        for year in aired.years() {
            for &genre in &rec_genres {
                genres.insert(genre.as_str());
                samples
                    .entry((year, genre.to_string()))
                    .or_default()
                    .push(rec.rating);
            }
        }
    }

    let cells = samples
        .into_iter()
        .map(|(key, mut ratings)| {
            // Sum in sorted order so input order can't change the result bits.
            ratings.sort_by(f64::total_cmp);
            let sum: f64 = ratings.iter().sum();
            (key, sum / ratings.len() as f64)
        })
        .collect();

    GenreYearMatrix {
        cells,
        genres: genres.into_iter().map(str::to_string).collect(),
        years: span.map(|(lo, hi)| lo..=hi),
    }
}
