use std::path::PathBuf;

use crate::cli::Args;
use crate::data::filter::EpisodeBucket;

pub const DEFAULT_EPISODE_BUCKETS: [&str; 7] = [
    "0-12", "13-26", "27-50", "51-100", "101-500", "501-1000", "1001+",
];

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Catalog opened on startup, if given on the command line.
    pub initial_path: Option<PathBuf>,
    /// Bucket options offered in the episode filter.
    pub episode_buckets: Vec<String>,
    /// Rating axis of the scatter view.
    pub rating_bounds: (f64, f64),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_path: None,
            episode_buckets: DEFAULT_EPISODE_BUCKETS.iter().map(|s| s.to_string()).collect(),
            rating_bounds: (0.0, 10.0),
        }
    }
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        let mut episode_buckets = valid_buckets(args.episode_buckets.iter().map(String::as_str));
        if episode_buckets.is_empty() {
            if !args.episode_buckets.is_empty() {
                log::warn!("No valid episode buckets given, using defaults");
            }
            episode_buckets = ViewerConfig::default().episode_buckets;
        }

        Self {
            initial_path: args.path,
            episode_buckets,
            ..Self::default()
        }
    }
}

/// Keep the well-formed bucket strings, trimmed.
fn valid_buckets<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    raw.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| match s.parse::<EpisodeBucket>() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Ignoring episode bucket: {e}");
                false
            }
        })
        .map(str::to_string)
        .collect()
}
