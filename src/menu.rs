// Menu - the interactive command loop
// Reads choices from any BufRead and writes to any Write, so a session can be
// scripted in tests exactly as a user would type it.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::bid::{str_to_double, Bid};
use crate::loader::load_bids;
use crate::BidList;

/// Choice - one menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    EnterBid,
    LoadBids,
    DisplayAll,
    FindBid,
    RemoveBid,
    Exit,
    Unknown(String),
}

impl Choice {
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<i32>() {
            Ok(1) => Choice::EnterBid,
            Ok(2) => Choice::LoadBids,
            Ok(3) => Choice::DisplayAll,
            Ok(4) => Choice::FindBid,
            Ok(5) => Choice::RemoveBid,
            Ok(9) => Choice::Exit,
            _ => Choice::Unknown(input.trim().to_string()),
        }
    }
}

pub struct Menu<R, W> {
    input: R,
    output: W,
    csv_path: PathBuf,
    bid_key: String,
    bids: BidList,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(
        input: R,
        output: W,
        csv_path: impl Into<PathBuf>,
        bid_key: impl Into<String>,
    ) -> Self {
        Menu {
            input,
            output,
            csv_path: csv_path.into(),
            bid_key: bid_key.into(),
            bids: BidList::new(),
        }
    }

    pub fn bids(&self) -> &BidList {
        &self.bids
    }

    /// Run until the user picks 9 or input runs out
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let choice = match self.read_line()? {
                Some(line) => Choice::parse(&line),
                None => Choice::Exit,
            };
            debug!(?choice, "menu choice");

            match choice {
                Choice::EnterBid => self.enter_bid()?,
                Choice::LoadBids => self.load()?,
                Choice::DisplayAll => self.display_all()?,
                Choice::FindBid => self.find()?,
                Choice::RemoveBid => self.remove()?,
                Choice::Exit => break,
                Choice::Unknown(raw) => {
                    writeln!(self.output, "{} is not a valid choice.", raw)?;
                }
            }
        }

        writeln!(self.output, "Good bye.")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "  1. Enter a Bid")?;
        writeln!(self.output, "  2. Load Bids")?;
        writeln!(self.output, "  3. Display All Bids")?;
        writeln!(self.output, "  4. Find Bid")?;
        writeln!(self.output, "  5. Remove Bid")?;
        writeln!(self.output, "  9. Exit")?;
        write!(self.output, "Enter choice: ")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn enter_bid(&mut self) -> Result<()> {
        let Some(bid) = self.prompt_bid()? else {
            return Ok(());
        };

        writeln!(self.output, "{}", bid)?;
        info!(id = %bid.id, "bid entered");
        self.bids.append(bid);
        Ok(())
    }

    /// Ask for each field in turn. `None` if input ends part way through.
    fn prompt_bid(&mut self) -> Result<Option<Bid>> {
        let Some(id) = self.prompt("Enter Id: ")? else {
            return Ok(None);
        };
        let Some(title) = self.prompt("Enter title: ")? else {
            return Ok(None);
        };
        let Some(fund) = self.prompt("Enter fund: ")? else {
            return Ok(None);
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(None);
        };

        Ok(Some(Bid::new(id, title, fund, str_to_double(&amount, '$'))))
    }

    fn load(&mut self) -> Result<()> {
        writeln!(self.output, "Loading CSV file {}", self.csv_path.display())?;

        let start = Instant::now();
        if let Err(e) = load_bids(&self.csv_path, &mut self.bids) {
            warn!(error = %e, "CSV load failed");
            writeln!(self.output, "Error loading bids: {}", e)?;
        }
        writeln!(self.output, "{} bids read", self.bids.len())?;

        let elapsed = start.elapsed();
        writeln!(self.output, "time: {} milliseconds", elapsed.as_millis())?;
        self.write_seconds(elapsed)
    }

    fn display_all(&mut self) -> Result<()> {
        for bid in self.bids.iter() {
            writeln!(self.output, "{}", bid)?;
        }
        Ok(())
    }

    fn find(&mut self) -> Result<()> {
        let start = Instant::now();
        let found = self.bids.search(&self.bid_key);
        let elapsed = start.elapsed();

        match found {
            Some(bid) => writeln!(self.output, "{}", bid)?,
            None => writeln!(self.output, "Bid Id {} not found.", self.bid_key)?,
        }

        // A single scan finishes well under a millisecond
        writeln!(self.output, "time: {} microseconds", elapsed.as_micros())?;
        self.write_seconds(elapsed)
    }

    fn remove(&mut self) -> Result<()> {
        match self.bids.remove(&self.bid_key) {
            Some(bid) => info!(id = %bid.id, remaining = self.bids.len(), "bid removed"),
            None => debug!(key = %self.bid_key, "nothing to remove"),
        }
        Ok(())
    }

    fn write_seconds(&mut self, elapsed: Duration) -> Result<()> {
        writeln!(self.output, "time: {} seconds", elapsed.as_secs_f64())?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush().context("Failed to flush output")?;
        self.read_line()
    }

    /// Next line of input without its line ending, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "ArticleTitle,ArticleID,Department,CloseDate,WinningBid,InventoryID,VehicleID,ReceiptNumber,Fund\n";

    /// Run a scripted session, return the menu (for its list) and everything printed
    fn session(
        script: &str,
        csv_path: &str,
        key: &str,
    ) -> (Menu<Cursor<Vec<u8>>, Vec<u8>>, String) {
        let mut menu = Menu::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            csv_path,
            key,
        );
        menu.run().unwrap();
        let out = String::from_utf8(menu.output.clone()).unwrap();
        (menu, out)
    }

    fn csv_fixture(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(rows.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Choice::EnterBid);
        assert_eq!(Choice::parse(" 2 "), Choice::LoadBids);
        assert_eq!(Choice::parse("3"), Choice::DisplayAll);
        assert_eq!(Choice::parse("4"), Choice::FindBid);
        assert_eq!(Choice::parse("5"), Choice::RemoveBid);
        assert_eq!(Choice::parse("9"), Choice::Exit);
        assert_eq!(Choice::parse("7"), Choice::Unknown("7".to_string()));
        assert_eq!(Choice::parse("abc"), Choice::Unknown("abc".to_string()));
    }

    #[test]
    fn test_exit_immediately() {
        let (menu, out) = session("9\n", "unused.csv", "98109");
        assert!(out.starts_with("Menu:\n  1. Enter a Bid\n"));
        assert!(out.ends_with("Good bye.\n"));
        assert!(menu.bids().is_empty());
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, out) = session("", "unused.csv", "98109");
        assert!(out.ends_with("Good bye.\n"));
    }

    #[test]
    fn test_unknown_choice_keeps_looping() {
        let (_, out) = session("hello\n9\n", "unused.csv", "98109");
        assert!(out.contains("hello is not a valid choice."));
        assert_eq!(out.matches("Menu:").count(), 2);
    }

    #[test]
    fn test_enter_bid_then_find() {
        let script = "1\n98109\nOffice Chair\nGeneral Fund\n$45.50\n4\n9\n";
        let (menu, out) = session(script, "unused.csv", "98109");

        assert_eq!(menu.bids().len(), 1);
        let bid = menu.bids().search("98109").unwrap();
        assert_eq!(bid.title, "Office Chair");
        assert_eq!(bid.fund, "General Fund");
        assert_eq!(bid.amount, 45.5);

        assert_eq!(out.matches("98109: Office Chair | 45.5 | General Fund").count(), 2);
        assert!(out.contains(" microseconds\n"));
        assert!(out.contains(" seconds\n"));
    }

    #[test]
    fn test_timing_units_per_choice() {
        let file = csv_fixture("Chair,100,,,$10.00,,,,General Fund\n");
        let path = file.path().to_str().unwrap().to_string();

        let (_, load_out) = session("2\n9\n", &path, "100");
        assert!(load_out.contains(" milliseconds\n"));
        assert!(!load_out.contains("microseconds"));

        let (_, find_out) = session("4\n9\n", &path, "100");
        assert!(find_out.contains(" microseconds\n"));
        assert!(!find_out.contains("milliseconds"));
    }

    #[test]
    fn test_enter_bid_cut_short_adds_nothing() {
        let (menu, out) = session("1\n123\nTitle only\n", "unused.csv", "123");
        assert!(menu.bids().is_empty());
        assert!(out.ends_with("Good bye.\n"));
    }

    #[test]
    fn test_find_missing_reports_not_found() {
        let (_, out) = session("4\n9\n", "unused.csv", "98109");
        assert!(out.contains("Bid Id 98109 not found."));
    }

    #[test]
    fn test_load_display_remove() {
        let file = csv_fixture(
            "Chair,100,,,$10.00,,,,General Fund\nDesk,101,,,$20.00,,,,Enterprise\nLamp,102,,,$5,,,,General Fund\n",
        );
        let path = file.path().to_str().unwrap().to_string();

        let (menu, out) = session("2\n5\n3\n9\n", &path, "101");

        assert!(out.contains("3 bids read"));
        assert!(out.contains("100: Chair | 10 | General Fund"));
        assert!(out.contains("102: Lamp | 5 | General Fund"));
        assert!(!out.contains("101: Desk"));

        let ids: Vec<&str> = menu.bids().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["100", "102"]);
    }

    #[test]
    fn test_load_error_is_reported_and_menu_continues() {
        let (menu, out) = session("2\n4\n9\n", "does/not/exist.csv", "98109");

        assert!(out.contains("Error loading bids: failed to open does/not/exist.csv"));
        assert!(out.contains("0 bids read"));
        assert!(out.contains("Bid Id 98109 not found."));
        assert!(out.ends_with("Good bye.\n"));
        assert!(menu.bids().is_empty());
    }

    #[test]
    fn test_remove_on_empty_list_is_quiet() {
        let (menu, out) = session("5\n3\n9\n", "unused.csv", "98109");
        assert!(menu.bids().is_empty());
        assert_eq!(out.matches("Menu:").count(), 3);
    }
}
