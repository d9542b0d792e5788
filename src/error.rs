use std::io;

use crate::store::Kind;

/// D-Bus error name returned by the bus daemon when the requested player is not connected.
pub(crate) const SERVICE_UNKNOWN: &str = "org.freedesktop.DBus.Error.ServiceUnknown";

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Something went wrong while querying a player or reading its metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The player's bus name has no owner on the session bus.
    #[error("is the player running? ({0} is not on the session bus)")]
    PlayerNotRunning(String),

    /// The player answered, but the `Metadata` property was not a dictionary of variants.
    #[error("malformed metadata reply: {0}")]
    MalformedReply(String),

    /// The bus could not be reached, or the call failed for any other reason.
    #[error("D-Bus call failed: {0}")]
    DBus(#[from] zbus::Error),

    /// A metadata field required for output was missing or had an unexpected type.
    #[error("could not read metadata ({0})")]
    Lookup(#[from] LookupError),

    /// Writing output failed.
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Classifies an error returned from calling into the player named `player`.
    pub(crate) fn from_call(error: zbus::Error, player: &str) -> Self {
        match error {
            zbus::Error::MethodError(ref name, _, _) if name.as_str() == SERVICE_UNKNOWN => {
                Error::PlayerNotRunning(player.to_owned())
            }
            zbus::Error::FDO(ref fdo) if matches!(**fdo, zbus::fdo::Error::ServiceUnknown(_)) => {
                Error::PlayerNotRunning(player.to_owned())
            }
            zbus::Error::Variant(ref variant) => Error::MalformedReply(variant.to_string()),
            other => Error::DBus(other),
        }
    }
}

/// A typed lookup in a [`Store`](crate::Store) did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No entry has the key, or the requested kind cannot be retrieved from a store.
    #[error("{key} not found")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// The first entry with the key holds a different kind of value.
    #[error("{key} is {found}, expected {expected}")]
    WrongType {
        /// The key that was looked up.
        key: String,
        /// The kind the caller asked for.
        expected: Kind,
        /// The kind actually stored under the key.
        found: Kind,
    },
}

impl LookupError {
    pub(crate) fn not_found(key: &str) -> Self {
        LookupError::NotFound {
            key: key.to_owned(),
        }
    }

    pub(crate) fn wrong_type(key: &str, expected: Kind, found: Kind) -> Self {
        LookupError::WrongType {
            key: key.to_owned(),
            expected,
            found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_describes_a_missing_player() {
        let error = Error::PlayerNotRunning(String::from("org.mpris.MediaPlayer2.spotify"));
        assert_eq!(
            error.to_string(),
            "is the player running? (org.mpris.MediaPlayer2.spotify is not on the session bus)"
        );
    }

    #[test]
    fn it_wraps_lookup_errors() {
        let error = Error::from(LookupError::wrong_type(
            "xesam:title",
            Kind::String,
            Kind::Int32,
        ));
        assert_eq!(
            error.to_string(),
            "could not read metadata (xesam:title is Int32, expected String)"
        );
    }

    #[test]
    fn it_classifies_unknown_services_as_missing_players() {
        let fdo = zbus::fdo::Error::ServiceUnknown(String::from("no such name"));
        let error = Error::from_call(zbus::Error::FDO(Box::new(fdo)), "org.mpris.MediaPlayer2.vlc");

        assert!(matches!(
            error,
            Error::PlayerNotRunning(ref name) if name == "org.mpris.MediaPlayer2.vlc"
        ));
    }

    #[test]
    fn it_classifies_service_unknown_method_errors_as_missing_players() {
        let name = zbus::names::ErrorName::from_static_str(SERVICE_UNKNOWN).unwrap();
        let message = zbus::Message::method(
            None::<&str>,
            Some("org.mpris.MediaPlayer2.vlc"),
            "/org/mpris/MediaPlayer2",
            Some("org.freedesktop.DBus.Properties"),
            "Get",
            &(),
        )
        .unwrap();
        let error = Error::from_call(
            zbus::Error::MethodError(name.into(), None, std::sync::Arc::new(message)),
            "org.mpris.MediaPlayer2.vlc",
        );

        assert!(matches!(
            error,
            Error::PlayerNotRunning(ref name) if name == "org.mpris.MediaPlayer2.vlc"
        ));
    }

    #[test]
    fn it_classifies_mistyped_replies_as_malformed() {
        let error = Error::from_call(
            zbus::Error::Variant(zbus::zvariant::Error::IncorrectType),
            "org.mpris.MediaPlayer2.vlc",
        );

        assert!(matches!(error, Error::MalformedReply(_)));
        assert!(error.to_string().starts_with("malformed metadata reply"));
    }

    #[test]
    fn it_passes_other_bus_errors_through() {
        let error = Error::from_call(zbus::Error::InvalidReply, "org.mpris.MediaPlayer2.vlc");
        assert!(matches!(error, Error::DBus(zbus::Error::InvalidReply)));
    }
}
