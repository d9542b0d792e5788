use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use zbus::blocking::Connection;
use zbus::zvariant::OwnedValue;
use zbus::CacheProperties;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::proxies::{MprisPlayerProxyBlocking, MPRIS2_PATH};
use crate::store::Store;
use crate::tagged::TaggedValue;

/// The raw `Metadata` property of a player: metadata keys mapped to D-Bus values.
pub type MetadataReply = HashMap<String, OwnedValue>;

/// Something that can produce a player's raw `Metadata` property.
pub trait MetadataSource {
    /// Retrieves the `Metadata` property, blocking until it is available.
    fn get_metadata(&self) -> Result<MetadataReply>;
}

/// A player on the D-Bus session bus.
///
/// Every call to [`MetadataSource::get_metadata`] issues exactly one
/// `org.freedesktop.DBus.Properties.Get` call for `org.mpris.MediaPlayer2.Player.Metadata`. The
/// call waits for as long as the player takes to answer.
pub struct BusSource<'a> {
    proxy: MprisPlayerProxyBlocking<'a>,
    player: &'a str,
}

impl<'a> BusSource<'a> {
    /// Addresses the player configured in `config` over `connection`.
    ///
    /// This does not talk to the player yet; a missing player is only detected when metadata is
    /// requested.
    pub fn new(connection: &Connection, config: &'a Config) -> Result<Self> {
        let proxy = MprisPlayerProxyBlocking::builder(connection)
            .destination(config.player())?
            .path(MPRIS2_PATH)?
            .cache_properties(CacheProperties::No)
            .build()?;

        Ok(BusSource {
            proxy,
            player: config.player(),
        })
    }

    /// Returns the player's D-Bus bus name.
    pub fn bus_name(&self) -> &str {
        self.player
    }
}

impl<'a> fmt::Debug for BusSource<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusSource")
            .field("player", &self.player)
            .finish()
    }
}

impl<'a> MetadataSource for BusSource<'a> {
    fn get_metadata(&self) -> Result<MetadataReply> {
        self.proxy
            .metadata()
            .map_err(|error| Error::from_call(error, self.player))
    }
}

/// Queries `source` for metadata and decodes every entry into a new store.
///
/// Values of unsupported kinds and entries that do not fit in the store are skipped with a
/// warning. Only a failed call is an error.
pub fn fetch_metadata<S>(source: &S, config: &Config) -> Result<Store>
where
    S: MetadataSource + ?Sized,
{
    let reply = source.get_metadata()?;
    debug!(entries = reply.len(), "received metadata reply");
    Ok(decode_reply(reply, config))
}

/// Decodes a `Metadata` reply into a new store, visiting keys in sorted order.
pub fn decode_reply(reply: MetadataReply, config: &Config) -> Store {
    let decoder = config.decoder();
    let mut store = config.new_store();

    let mut entries: Vec<(String, OwnedValue)> = reply.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, value) in entries {
        decoder.decode(TaggedValue::from(value), &key, &mut store);
    }

    store
}
