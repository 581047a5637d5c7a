use std::collections::BTreeSet;
use std::str::FromStr;

use thiserror::Error;

use super::model::Record;
use super::universe::ALL_STATUSES;

// ---------------------------------------------------------------------------
// Episode buckets: "min-max" or "min+"
// ---------------------------------------------------------------------------

/// An episode-count interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeBucket {
    Between { min: u32, max: u32 },
    AtLeast(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed episode bucket {0:?}, expected \"min-max\" or \"min+\"")]
pub struct BucketParseError(pub String);

impl FromStr for EpisodeBucket {
    type Err = BucketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || BucketParseError(s.to_string());
        let t = s.trim();
        if let Some(min) = t.strip_suffix('+') {
            return min.trim().parse().map(EpisodeBucket::AtLeast).map_err(|_| err());
        }
        let (lo, hi) = t.split_once('-').ok_or_else(err)?;
        let min: u32 = lo.trim().parse().map_err(|_| err())?;
        let max: u32 = hi.trim().parse().map_err(|_| err())?;
        if min > max {
            return Err(err());
        }
        Ok(EpisodeBucket::Between { min, max })
    }
}

impl EpisodeBucket {
    pub fn contains(&self, episodes: u32) -> bool {
        match *self {
            EpisodeBucket::Between { min, max } => (min..=max).contains(&episodes),
            EpisodeBucket::AtLeast(min) => episodes >= min,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state: one selection per dimension
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StatusSelection {
    #[default]
    All,
    Only(String),
}

impl StatusSelection {
    pub fn label(&self) -> &str {
        match self {
            StatusSelection::All => ALL_STATUSES,
            StatusSelection::Only(s) => s,
        }
    }
}

/// The user's current selection. Treated as a value: changes produce a new
/// state rather than patching the one a computation is using.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    /// A record must carry every selected genre. Empty → no constraint.
    pub genres: BTreeSet<String>,
    pub status: StatusSelection,
    /// A record must fall in at least one bucket. Empty → no constraint.
    pub episode_buckets: BTreeSet<String>,
    /// A record's aired range must span this year.
    pub year: Option<i32>,
}

impl FilterState {
    /// Same selection with the genre dimension cleared.
    pub fn without_genres(&self) -> FilterState {
        FilterState {
            genres: BTreeSet::new(),
            ..self.clone()
        }
    }

    /// Whether any dimension is constrained.
    pub fn is_active(&self) -> bool {
        !self.genres.is_empty()
            || self.status != StatusSelection::All
            || !self.episode_buckets.is_empty()
            || self.year.is_some()
    }

    /// Parse bucket strings once so a whole collection can be tested.
    fn compile(&self) -> Predicate<'_> {
        let buckets = self
            .episode_buckets
            .iter()
            .filter_map(|b| match b.parse::<EpisodeBucket>() {
                Ok(bucket) => Some(bucket),
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            })
            .collect();
        Predicate {
            state: self,
            buckets,
        }
    }
}

struct Predicate<'a> {
    state: &'a FilterState,
    /// Well-formed buckets only; malformed ones can never match.
    buckets: Vec<EpisodeBucket>,
}

impl Predicate<'_> {
    fn matches(&self, rec: &Record) -> bool {
        let s = self.state;

        if !s.genres.iter().all(|g| rec.has_genre(g)) {
            return false;
        }
        if let StatusSelection::Only(status) = &s.status {
            if rec.status != *status {
                return false;
            }
        }
        // A non-empty selection is active even if every entry is malformed.
        if !s.episode_buckets.is_empty() && !self.buckets.iter().any(|b| b.contains(rec.episodes)) {
            return false;
        }
        if let Some(year) = s.year {
            match rec.aired {
                Some(range) if range.contains(year) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Return indices of records that pass all active filters, in input order.
pub fn filtered_indices(records: &[Record], filters: &FilterState) -> Vec<usize> {
    let predicate = filters.compile();
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| predicate.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records that pass all active filters, in input order.
pub fn apply_filter(records: &[Record], filters: &FilterState) -> Vec<Record> {
    filtered_indices(records, filters)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::AiredRange;

    fn rec(name: &str, genres: &[&str], status: &str, episodes: u32, aired: Option<(i32, i32)>) -> Record {
        Record {
            name: name.into(),
            rating: 7.0,
            rating_defaulted: false,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            status: status.into(),
            episodes,
            aired: aired.map(|(a, b)| AiredRange::new(a, b)),
            synopsis: String::new(),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec("a", &["Action", "Drama"], "Finished Airing", 26, Some((1998, 1999))),
            rec("b", &["Action"], "Currently Airing", 600, Some((1999, 2024))),
            rec("c", &["Drama", "Romance"], "Finished Airing", 12, Some((2010, 2010))),
            rec("d", &["Comedy"], "Finished Airing", 75, None),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn matches(f: &FilterState, r: &Record) -> bool {
        !apply_filter(std::slice::from_ref(r), f).is_empty()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let records = sample();
        let out = apply_filter(&records, &FilterState::default());
        assert_eq!(out, records);
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn test_genres_are_conjunctive() {
        let records = sample();
        let f = FilterState {
            genres: set(&["Action", "Drama"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["a"]);

        let f = FilterState {
            genres: set(&["Drama"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["a", "c"]);
    }

    #[test]
    fn test_status_dimension() {
        let records = sample();
        let f = FilterState {
            status: StatusSelection::Only("Currently Airing".into()),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["b"]);
    }

    #[test]
    fn test_status_literally_named_all() {
        let records = vec![
            rec("x", &["Action"], "all", 12, None),
            rec("y", &["Action"], "Finished Airing", 12, None),
        ];
        let f = FilterState {
            status: StatusSelection::Only("all".into()),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["x"]);
        assert!(f.is_active());
        assert_eq!(f.status.label(), "all");
        assert_eq!(apply_filter(&records, &FilterState::default()).len(), 2);
    }

    #[test]
    fn test_buckets_are_disjunctive() {
        let records = sample();
        let f = FilterState {
            episode_buckets: set(&["0-50", "501-1000"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["a", "b", "c"]);

        let f = FilterState {
            episode_buckets: set(&["51-100"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["d"]);
    }

    #[test]
    fn test_malformed_bucket_only_fails_itself() {
        let records = sample();
        let f = FilterState {
            episode_buckets: set(&["lots", "20-10", "500+"]),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["b"]);

        let f = FilterState {
            episode_buckets: set(&["lots"]),
            ..Default::default()
        };
        assert!(apply_filter(&records, &f).is_empty());
    }

    #[test]
    fn test_year_spans_range() {
        let records = sample();
        let f = FilterState {
            year: Some(1999),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["a", "b"]);

        let f = FilterState {
            year: Some(2015),
            ..Default::default()
        };
        assert_eq!(names(&apply_filter(&records, &f)), vec!["b"]);
    }

    #[test]
    fn test_dimension_independence() {
        let target = rec("t", &["Action", "Drama", "Mecha"], "Finished Airing", 600, Some((2000, 2001)));
        let f = FilterState {
            genres: set(&["Action", "Drama"]),
            status: StatusSelection::Only("Finished Airing".into()),
            episode_buckets: set(&["0-50", "501-1000"]),
            year: Some(2001),
        };
        assert!(matches(&f, &target));

        let mut wrong_genre = target.clone();
        wrong_genre.genres = vec!["Action".into()];
        let mut wrong_status = target.clone();
        wrong_status.status = "Currently Airing".into();
        let mut wrong_episodes = target.clone();
        wrong_episodes.episodes = 75;
        let mut wrong_year = target.clone();
        wrong_year.aired = Some(AiredRange::single(1990));
        let mut no_year = target.clone();
        no_year.aired = None;

        for r in [wrong_genre, wrong_status, wrong_episodes, wrong_year, no_year] {
            assert!(!matches(&f, &r), "{r:?} should fail");
        }
    }

    #[test]
    fn test_idempotent() {
        let records = sample();
        let f = FilterState {
            genres: set(&["Drama"]),
            episode_buckets: set(&["0-50"]),
            ..Default::default()
        };
        let once = apply_filter(&records, &f);
        let twice = apply_filter(&once, &f);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_without_genres() {
        let f = FilterState {
            genres: set(&["Drama"]),
            year: Some(2000),
            ..Default::default()
        };
        let base = f.without_genres();
        assert!(base.genres.is_empty());
        assert_eq!(base.year, Some(2000));
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(
            "0-50".parse::<EpisodeBucket>(),
            Ok(EpisodeBucket::Between { min: 0, max: 50 })
        );
        assert_eq!(" 1001+ ".parse::<EpisodeBucket>(), Ok(EpisodeBucket::AtLeast(1001)));
        assert!("50-0".parse::<EpisodeBucket>().is_err());
        assert!("-5".parse::<EpisodeBucket>().is_err());
        assert!("many".parse::<EpisodeBucket>().is_err());
        assert!(EpisodeBucket::AtLeast(501).contains(501));
        assert!(!EpisodeBucket::Between { min: 0, max: 50 }.contains(51));
    }
}
