use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::model::{Record, GENRE_HEADER_SENTINEL};

/// Status option that disables the status filter.
pub const ALL_STATUSES: &str = "all";

// ---------------------------------------------------------------------------
// Universe – filter options observable in a catalog
// ---------------------------------------------------------------------------

/// Distinct genres and statuses of a record collection, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    pub genres: Vec<String>,
    /// Always starts with [`ALL_STATUSES`], which stands for "no status
    /// filter". A catalog status spelled the same way is listed again as
    /// an ordinary entry.
    pub statuses: Vec<String>,
    /// Earliest start year to latest end year over all aired ranges.
    pub years: Option<RangeInclusive<i32>>,
}

/// Collect the filter options for a record collection.
pub fn derive_universe(records: &[Record]) -> Universe {
    let mut seen_genres: HashSet<&str> = HashSet::new();
    let mut seen_statuses: HashSet<&str> = HashSet::new();
    let mut genres = Vec::new();
    let mut statuses = vec![ALL_STATUSES.to_string()];
    let mut years: Option<(i32, i32)> = None;

    for rec in records {
        for g in &rec.genres {
            if g != GENRE_HEADER_SENTINEL && seen_genres.insert(g) {
                genres.push(g.clone());
            }
        }
        if seen_statuses.insert(&rec.status) {
            statuses.push(rec.status.clone());
        }
        if let Some(r) = rec.aired {
            years = Some(match years {
                Some((lo, hi)) => (lo.min(r.start_year()), hi.max(r.end_year())),
                None => (r.start_year(), r.end_year()),
            });
        }
    }

    Universe {
        genres,
        statuses,
        years: years.map(|(lo, hi)| lo..=hi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AiredRange;

    fn rec(genres: &[&str], status: &str, aired: Option<AiredRange>) -> Record {
        Record {
            name: "x".into(),
            rating: 5.0,
            rating_defaulted: false,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            status: status.into(),
            episodes: 1,
            aired,
            synopsis: String::new(),
        }
    }

    #[test]
    fn test_first_seen_order_and_dedup() {
        let records = vec![
            rec(&["Drama", "Action"], "Finished Airing", None),
            rec(&["Action", "Comedy"], "Currently Airing", None),
            rec(&["Drama"], "Finished Airing", None),
        ];
        let u = derive_universe(&records);
        assert_eq!(u.genres, vec!["Drama", "Action", "Comedy"]);
        assert_eq!(
            u.statuses,
            vec!["all", "Finished Airing", "Currently Airing"]
        );
    }

    #[test]
    fn test_header_sentinel_excluded() {
        let records = vec![
            rec(&["Genres"], "Status", None),
            rec(&["Action"], "Finished Airing", None),
        ];
        let u = derive_universe(&records);
        assert_eq!(u.genres, vec!["Action"]);
        assert!(!u.genres.iter().any(|g| g == GENRE_HEADER_SENTINEL));
    }

    #[test]
    fn test_status_named_all_is_kept() {
        let records = vec![
            rec(&["A"], "all", None),
            rec(&["A"], "Finished Airing", None),
        ];
        let u = derive_universe(&records);
        assert_eq!(u.statuses, vec!["all", "all", "Finished Airing"]);
    }

    #[test]
    fn test_empty_collection_still_has_all() {
        let u = derive_universe(&[]);
        assert!(u.genres.is_empty());
        assert_eq!(u.statuses, vec![ALL_STATUSES]);
        assert_eq!(u.years, None);
    }

    #[test]
    fn test_year_span() {
        let records = vec![
            rec(&["A"], "s", Some(AiredRange::new(2001, 2004))),
            rec(&["A"], "s", None),
            rec(&["A"], "s", Some(AiredRange::single(1995))),
        ];
        assert_eq!(derive_universe(&records).years, Some(1995..=2004));
    }
}
