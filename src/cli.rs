use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "anime-lens", version, about = "Explore an anime catalog by genre, status, episodes and year")]
pub struct Args {
    /// Catalog to open on startup (.csv, .json or .parquet)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Episode buckets offered in the filter panel, e.g. "0-12,13-26,501+"
    #[arg(long, env = "ANIME_LENS_EPISODE_BUCKETS", value_delimiter = ',')]
    pub episode_buckets: Vec<String>,
}
