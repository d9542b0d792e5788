//! Prints the metadata of the Spotify MPRIS player.
//!
//! ```text
//! mpris-metadata [dump|track]
//!
//!   dump     Print every metadata entry as `key<TAB>Kind: value` (default)
//!   track    Print `artist - title`
//! ```
//!
//! Exits with 1 when the player is not running, the query fails or the track cannot be read.
//! Diagnostics go to stderr.
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use zbus::blocking::Connection;

use mpris_metadata::{BusSource, Command, Config};

#[derive(Debug, Parser)]
#[command(name = "mpris-metadata", version, about = "Print the metadata of an MPRIS player")]
struct Cli {
    /// What to print.
    #[arg(value_enum, default_value_t = Command::Dump)]
    command: Command,
}

/// Warnings and above, without colours unless `ansi` is set.
fn diagnostics<W>(writer: W, ansi: bool) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(Level::WARN)
        .with_target(false)
        .with_ansi(ansi)
        .finish()
}

fn main() -> ExitCode {
    diagnostics(io::stderr, io::stderr().is_terminal()).init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> mpris_metadata::Result<()> {
    let config = Config::default();
    let connection = Connection::session()?;
    let source = BusSource::new(&connection, &config)?;

    let stdout = io::stdout();
    mpris_metadata::run(command, &source, &config, &mut stdout.lock())
}
