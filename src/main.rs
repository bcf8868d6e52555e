use anyhow::Result;
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use bid_list::{Cli, Menu};

fn main() -> Result<()> {
    let cli = match Cli::import() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    // Logs go to stderr so the menu owns stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level)?)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        csv_path = %cli.csv_path.display(),
        bid_key = %cli.bid_key,
        version = bid_list::VERSION,
        "starting bid list"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), cli.csv_path, cli.bid_key);
    menu.run()?;

    Ok(())
}
