// Bid List - Core Library
// Exposes the list, the record type, the CSV loader and the menu for the CLI and tests

pub mod bid;
pub mod cli;
pub mod list;
pub mod loader;
pub mod menu;

// Re-export commonly used types
pub use bid::{str_to_double, Bid};
pub use cli::{Cli, DEFAULT_BID_KEY, DEFAULT_CSV_PATH};
pub use list::{Iter, Keyed, LinkedList};
pub use loader::{bid_from_record, load_bids, load_bids_from_reader, LoadError};
pub use menu::{Choice, Menu};

/// The list specialised to bids
pub type BidList = LinkedList<Bid>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
