//! `[serve]` section: the preview server started by `folio serve`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Where `folio serve` listens and whether it rebuilds on edits.
///
/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 5277
/// watch = false
/// ```
///
/// `-i`, `-p` and `-w` on the command line take precedence.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Bind address; `0.0.0.0` exposes the preview on the LAN.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port tried. Taken ports move on to the next one.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild when the data file, assets or `folio.toml` change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}
