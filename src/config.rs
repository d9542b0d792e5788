use crate::decode::{Decoder, DEFAULT_MAX_DEPTH};
use crate::store::{Store, DEFAULT_CAPACITY};

/// Bus name of the player queried unless configured otherwise.
pub const DEFAULT_PLAYER: &str = "org.mpris.MediaPlayer2.spotify";

/// Settings for a single metadata query.
///
/// ```rust
/// use mpris_metadata::Config;
///
/// let config = Config::new()
///     .with_player("org.mpris.MediaPlayer2.vlc")
///     .with_capacity(20);
/// assert_eq!(config.player(), "org.mpris.MediaPlayer2.vlc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    player: String,
    capacity: usize,
    max_depth: Option<usize>,
}

impl Config {
    /// Creates a configuration with the default player, store capacity and nesting limit.
    pub fn new() -> Self {
        Config {
            player: String::from(DEFAULT_PLAYER),
            capacity: DEFAULT_CAPACITY,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Query the player owning this bus name instead.
    pub fn with_player<S>(mut self, bus_name: S) -> Self
    where
        S: Into<String>,
    {
        self.player = bus_name.into();
        self
    }

    /// Keep at most `capacity` metadata entries.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Skip values nested deeper than `max_depth` arrays. `None` removes the limit.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The bus name of the player to query.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Maximum number of entries a fetched store keeps.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Deepest array nesting decoded, or `None` for no limit.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub(crate) fn decoder(&self) -> Decoder {
        Decoder::new(self.max_depth)
    }

    pub(crate) fn new_store(&self) -> Store {
        Store::with_capacity(self.capacity)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
