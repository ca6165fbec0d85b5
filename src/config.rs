//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::store::JsonFileStore;

#[derive(Debug, Clone, Parser)]
#[command(name = "kamikaze_furry", about = "Terminal arcade shooter", version)]
pub struct Config {
    /// Where the best score is kept.
    #[arg(long, value_name = "PATH")]
    pub high_score_file: Option<PathBuf>,

    /// Wall-clock milliseconds per frame. The simulation step is fixed.
    #[arg(long, value_name = "MS", default_value_t = 16,
          value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub tick_ms: u64,

    /// Append log output to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log debug messages.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
