use std::collections::HashMap;

use zbus::dbus_proxy;
use zbus::zvariant::OwnedValue;

pub(crate) const MPRIS2_PATH: &str = "/org/mpris/MediaPlayer2";

#[dbus_proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_service = "org.mpris.MediaPlayer2.spotify",
    default_path = "/org/mpris/MediaPlayer2",
    gen_async = false,
    blocking_name = "MprisPlayerProxyBlocking"
)]
pub(crate) trait MprisPlayer {
    #[dbus_proxy(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;
}
