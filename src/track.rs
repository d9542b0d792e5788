use std::fmt;

use crate::error::LookupError;
use crate::store::Store;

/// Metadata key of the track artist(s).
pub const ARTIST_KEY: &str = "xesam:artist";

/// Metadata key of the track title.
pub const TITLE_KEY: &str = "xesam:title";

/// The currently playing track, as shown in a status bar.
///
/// Displays as `artist - title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    artist: String,
    title: String,
}

impl Track {
    /// Creates a track from its artist and title.
    pub fn new<A, T>(artist: A, title: T) -> Self
    where
        A: Into<String>,
        T: Into<String>,
    {
        Track {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Reads the track from a metadata store.
    ///
    /// Based on `xesam:artist` and `xesam:title`. When a track has several artists only the
    /// first one is used.
    pub fn from_store(store: &Store) -> Result<Track, LookupError> {
        Ok(Track {
            artist: store.get_str(ARTIST_KEY)?,
            title: store.get_str(TITLE_KEY)?,
        })
    }

    /// The first artist of the track.
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// The name of the track.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}
