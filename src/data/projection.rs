use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use super::model::Record;

/// One scatter point: release year against rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: i32,
    pub y: f64,
    pub label: String,
    pub status: String,
    pub episodes: u32,
}

impl ScatterPoint {
    /// Hover text: title, year, rating, status and episode count.
    pub fn describe(&self) -> String {
        format!(
            "{}\nYear: {}\nRating: {:.2}\nStatus: {}\nEpisodes: {}",
            self.label, self.x, self.y, self.status, self.episodes
        )
    }
}

/// The point of a series closest to a plot position, in data units.
pub fn nearest_point<'a>(
    points: &'a [ScatterPoint],
    status: &str,
    x: f64,
    y: f64,
) -> Option<&'a ScatterPoint> {
    let dist = |p: &ScatterPoint| (p.x as f64 - x).powi(2) + (p.y - y).powi(2);
    points
        .iter()
        .filter(|p| p.status == status)
        .min_by(|a, b| dist(a).total_cmp(&dist(b)))
}

/// Lazy projection of records onto scatter points.
///
/// Cloning restarts the sequence from the beginning.
#[derive(Debug, Clone)]
pub struct Points<'a> {
    records: std::slice::Iter<'a, Record>,
}

impl Iterator for Points<'_> {
    type Item = ScatterPoint;

    fn next(&mut self) -> Option<ScatterPoint> {
        for rec in self.records.by_ref() {
            let Some(x) = rec.start_year() else {
                debug!("scatter: skipping {:?}, no air date", rec.name);
                continue;
            };
            if rec.rating_defaulted {
                debug!("scatter: skipping {:?}, no usable rating", rec.name);
                continue;
            }
            if !rec.rating.is_finite() {
                debug!("scatter: skipping {:?}, rating {}", rec.name, rec.rating);
                continue;
            }
            return Some(ScatterPoint {
                x,
                y: rec.rating,
                label: rec.name.clone(),
                status: rec.status.clone(),
                episodes: rec.episodes,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

/// Map records to scatter points, skipping those without a temporal anchor
/// or whose rating was never parsed.
pub fn project_points(records: &[Record]) -> Points<'_> {
    Points {
        records: records.iter(),
    }
}

/// Legend label for the genre context a point series was filtered by.
pub fn series_label(genres: &BTreeSet<String>) -> String {
    if genres.is_empty() {
        "Ratings (all genres)".to_string()
    } else {
        let joined: Vec<&str> = genres.iter().map(String::as_str).collect();
        format!("Ratings ({})", joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply_filter, FilterState};
    use crate::data::model::AiredRange;
    use crate::data::normalize::{normalize_row, RawRow};

    fn rec(name: &str, rating: f64, aired: Option<AiredRange>) -> Record {
        Record {
            name: name.into(),
            rating,
            rating_defaulted: false,
            genres: vec!["Action".into()],
            status: "Finished Airing".into(),
            episodes: 12,
            aired,
            synopsis: String::new(),
        }
    }

    #[test]
    fn test_points_use_start_year() {
        let records = vec![rec("a", 8.5, Some(AiredRange::new(1998, 1999)))];
        let pts: Vec<_> = project_points(&records).collect();
        assert_eq!(
            pts,
            vec![ScatterPoint {
                x: 1998,
                y: 8.5,
                label: "a".into(),
                status: "Finished Airing".into(),
                episodes: 12,
            }]
        );
    }

    #[test]
    fn test_skips_missing_dates_and_bad_ratings() {
        let records = vec![
            rec("a", 8.0, Some(AiredRange::single(2001))),
            rec("b", 7.0, None),
            rec("c", f64::NAN, Some(AiredRange::single(2002))),
            rec("d", 6.0, Some(AiredRange::single(2003))),
        ];
        let labels: Vec<String> = project_points(&records).map(|p| p.label).collect();
        assert_eq!(labels, vec!["a", "d"]);
    }

    fn normalized(cells: [&str; 7]) -> Record {
        normalize_row(&RawRow::from_cells(cells)).unwrap().0
    }

    #[test]
    fn test_unparseable_aired_kept_by_filter_but_not_projected() {
        let records = vec![
            normalized(["Lost", "8", "Action", "", "12", "Not available", "Finished Airing"]),
            normalized(["Found", "7", "Action", "", "12", "Apr 3, 2001", "Finished Airing"]),
        ];
        assert_eq!(records[0].aired, None);
        let filtered = apply_filter(&records, &FilterState::default());
        assert_eq!(filtered.len(), 2);
        let labels: Vec<String> = project_points(&filtered).map(|p| p.label).collect();
        assert_eq!(labels, vec!["Found"]);
    }

    #[test]
    fn test_unscored_rows_not_plotted_at_zero() {
        let records = vec![
            normalized(["Unscored", "N/A", "Action", "", "12", "2001", "Finished Airing"]),
            normalized(["Zero", "0", "Action", "", "12", "2001", "Finished Airing"]),
        ];
        assert_eq!(records[0].rating, 0.0);
        let pts: Vec<ScatterPoint> = project_points(&records).collect();
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].label, "Zero");
        assert_eq!(pts[0].y, 0.0);
    }

    #[test]
    fn test_restartable() {
        let records = vec![
            rec("a", 8.0, Some(AiredRange::single(2001))),
            rec("b", 7.0, Some(AiredRange::single(2002))),
        ];
        let mut pts = project_points(&records);
        let again = pts.clone();
        assert_eq!(pts.next().map(|p| p.label), Some("a".to_string()));
        assert_eq!(again.count(), 2);
        assert_eq!(pts.count(), 1);
    }

    #[test]
    fn test_nearest_point_within_series() {
        let records = vec![
            rec("a", 8.0, Some(AiredRange::single(2001))),
            rec("b", 6.0, Some(AiredRange::single(2005))),
        ];
        let mut pts: Vec<ScatterPoint> = project_points(&records).collect();
        pts.push(ScatterPoint {
            x: 2005,
            y: 6.1,
            label: "c".into(),
            status: "Currently Airing".into(),
            episodes: 3,
        });
        let hit = nearest_point(&pts, "Finished Airing", 2004.6, 6.2).unwrap();
        assert_eq!(hit.label, "b");
        assert_eq!(
            hit.describe(),
            "b\nYear: 2005\nRating: 6.00\nStatus: Finished Airing\nEpisodes: 12"
        );
        assert!(nearest_point(&pts, "Hiatus", 2001.0, 8.0).is_none());
    }

    #[test]
    fn test_series_label() {
        assert_eq!(series_label(&BTreeSet::new()), "Ratings (all genres)");
        let g: BTreeSet<String> = ["Drama", "Action"].iter().map(|s| s.to_string()).collect();
        assert_eq!(series_label(&g), "Ratings (Action, Drama)");
    }
}
