// CSV Loader - monthly sales export → Bid records
//
// Column layout of the export (0-indexed):
//   0 = title, 1 = id, 4 = winning amount ("$125.50"), 8 = fund

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::bid::{str_to_double, Bid};
use crate::list::LinkedList;

pub const TITLE_FIELD: usize = 0;
pub const ID_FIELD: usize = 1;
pub const AMOUNT_FIELD: usize = 4;
pub const FUND_FIELD: usize = 8;

/// Narrowest row we can map: it must reach the fund column
pub const MIN_FIELDS: usize = FUND_FIELD + 1;

/// Why a CSV load stopped early
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("CSV line {line} has {fields} fields, need at least 9")]
    ShortRow { line: u64, fields: usize },
}

/// Map one CSV row onto a Bid
///
/// Returns `None` if the row is too short to carry a fund column.
pub fn bid_from_record(record: &StringRecord) -> Option<Bid> {
    if record.len() < MIN_FIELDS {
        return None;
    }

    Some(Bid {
        id: record.get(ID_FIELD)?.to_string(),
        title: record.get(TITLE_FIELD)?.to_string(),
        fund: record.get(FUND_FIELD)?.to_string(),
        amount: str_to_double(record.get(AMOUNT_FIELD)?, '$'),
    })
}

/// Load every bid in the CSV file at `csv_path`, appending to `list`
///
/// The first line is treated as a header. On error, bids read before the bad
/// row stay in the list. Returns the number of bids appended.
pub fn load_bids(csv_path: &Path, list: &mut LinkedList<Bid>) -> Result<usize, LoadError> {
    info!(path = %csv_path.display(), "loading CSV file");

    let file = File::open(csv_path).map_err(|source| LoadError::Open {
        path: csv_path.to_path_buf(),
        source,
    })?;

    load_bids_from_reader(file, list)
}

/// Same as [`load_bids`] but reads from any byte source
pub fn load_bids_from_reader<R: Read>(
    reader: R,
    list: &mut LinkedList<Bid>,
) -> Result<usize, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut appended = 0;

    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let bid = bid_from_record(&record).ok_or(LoadError::ShortRow {
            line,
            fields: record.len(),
        })?;

        debug!(line, id = %bid.id, "appending bid");
        list.append(bid);
        appended += 1;
    }

    info!(appended, total = list.len(), "CSV load finished");
    Ok(appended)
}
