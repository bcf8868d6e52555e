// CLI - command-line arguments

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "eBid_Monthly_Sales.csv";
pub const DEFAULT_BID_KEY: &str = "98109";

/// Load, search and edit auction bids held in a linked list
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSV file to load bids from (menu option 2)
    #[arg(default_value = DEFAULT_CSV_PATH)]
    pub csv_path: PathBuf,

    /// Bid id used by find (4) and remove (5)
    #[arg(default_value = DEFAULT_BID_KEY)]
    pub bid_key: String,

    /// Log filter directive, e.g. `info` or `bid_list=debug`; logs go to stderr
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments
    pub fn import() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}
