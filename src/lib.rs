#![warn(missing_docs)]
#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces
)]

//!
//! # mpris-metadata
//!
//! `mpris-metadata` reads the track metadata of an MPRIS2-compatible media player over D-Bus,
//! for printing in status bars and scripts.
//!
//! The player's `Metadata` property is a dictionary of dynamically-typed values. Each entry is
//! decoded into a [`Store`]: an ordered, bounded list of typed entries. Array values are
//! flattened, so a property like `xesam:artist` contributes one entry per artist, all under the
//! same key.
//!
//! ## Getting started
//!
//! ```rust,no_run
//! use mpris_metadata::{fetch_metadata, BusSource, Config, Track};
//! use zbus::blocking::Connection;
//!
//! # fn main() -> mpris_metadata::Result<()> {
//! let config = Config::new().with_player("org.mpris.MediaPlayer2.vlc");
//! let connection = Connection::session()?;
//! let store = fetch_metadata(&BusSource::new(&connection, &config)?, &config)?;
//!
//! for line in store.dump() {
//!     println!("{}", line);
//! }
//! println!("{}", Track::from_store(&store)?);
//! # Ok(())
//! # }
//! ```

use std::io::Write;

mod config;
mod decode;
mod error;
mod fetch;
mod proxies;
mod store;
mod tagged;
mod track;

pub use config::{Config, DEFAULT_PLAYER};
pub use decode::{decode, Decoder, DEFAULT_MAX_DEPTH};
pub use error::{Error, LookupError, Result};
pub use fetch::{decode_reply, fetch_metadata, BusSource, MetadataReply, MetadataSource};
pub use store::{Dump, Entry, Kind, Store, Value, DEFAULT_CAPACITY};
pub use tagged::TaggedValue;
pub use track::{Track, ARTIST_KEY, TITLE_KEY};

/// What to print about the player's metadata.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, clap::ValueEnum)]
pub enum Command {
    /// Print every metadata entry, one per line.
    #[default]
    Dump,

    /// Print the current track as `artist - title`.
    Track,
}

/// Queries `source` once and writes the output of `command` to `out`.
///
/// Nothing is written unless the whole output is available; a missing player or an unreadable
/// track produces an error and no output.
pub fn run<S, W>(command: Command, source: &S, config: &Config, out: &mut W) -> Result<()>
where
    S: MetadataSource + ?Sized,
    W: Write,
{
    let store = fetch_metadata(source, config)?;

    match command {
        Command::Dump => {
            for line in store.dump() {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Track => {
            let track = Track::from_store(&store)?;
            writeln!(out, "{}", track)?;
        }
    }

    Ok(())
}
