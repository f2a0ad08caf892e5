//! Magnet URI assembly ([BEP-9], [BEP-52]).
//!
//! [BEP-9]: http://bittorrent.org/beps/bep_0009.html
//! [BEP-52]: http://bittorrent.org/beps/bep_0052.html

use super::error::TorrentError;
use super::info_hash::ComputedInfo;
use super::schema::TorrentMetadata;

/// Which optional parameters to put in a magnet link.
///
/// Defaults to every parameter enabled and all tracker tiers kept.
///
/// # Examples
///
/// ```
/// use torinfo::metainfo::MagnetOptions;
///
/// let options = MagnetOptions::default()
///     .exact_length(false)
///     .only_first_tier(true);
/// assert!(options.display_name);
/// assert!(!options.exact_length);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnetOptions {
    /// Emit `dn`, the torrent name.
    pub display_name: bool,
    /// Emit `xl`, the total content length.
    pub exact_length: bool,
    /// Emit one `ws` per `url-list` entry.
    pub web_seeds: bool,
    /// Emit one `tr` per tracker.
    pub trackers: bool,
    /// Keep only the first tracker tier. Ignored unless `trackers` is set.
    pub only_first_tier: bool,
}

impl Default for MagnetOptions {
    fn default() -> Self {
        Self {
            display_name: true,
            exact_length: true,
            web_seeds: true,
            trackers: true,
            only_first_tier: false,
        }
    }
}

impl MagnetOptions {
    /// Options with every optional parameter disabled: `xt` only.
    pub fn minimal() -> Self {
        Self {
            display_name: false,
            exact_length: false,
            web_seeds: false,
            trackers: false,
            only_first_tier: false,
        }
    }

    pub fn display_name(mut self, enabled: bool) -> Self {
        self.display_name = enabled;
        self
    }

    pub fn exact_length(mut self, enabled: bool) -> Self {
        self.exact_length = enabled;
        self
    }

    pub fn web_seeds(mut self, enabled: bool) -> Self {
        self.web_seeds = enabled;
        self
    }

    pub fn trackers(mut self, enabled: bool) -> Self {
        self.trackers = enabled;
        self
    }

    pub fn only_first_tier(mut self, enabled: bool) -> Self {
        self.only_first_tier = enabled;
        self
    }
}

/// Builds a magnet URI for a validated, hashed torrent.
///
/// Parameters are always emitted in this order: `xt` (v1 `btih` first, then
/// v2 `btmh`), `dn`, `xl`, `ws`..., `tr`.... `dn`, `ws` and `tr` values are
/// percent-encoded. No limit is put on the URI's length.
///
/// # Errors
///
/// Fails only when `xl` is requested and no total length can be derived:
/// the file lengths overflow `i64`, or (unreachable for a validated torrent)
/// there is no length source at all.
pub fn build_magnet(
    computed: &ComputedInfo,
    metadata: &TorrentMetadata,
    options: &MagnetOptions,
) -> Result<String, TorrentError> {
    let mut params = Vec::new();

    if let Some(hash) = computed.hash_v1() {
        params.push(format!("xt=urn:btih:{}", hash.to_hex()));
    }
    if let Some(hash) = computed.hash_v2() {
        params.push(format!("xt=urn:btmh:{}", hash.to_multihash_hex()));
    }

    let info = metadata.info();

    if options.display_name {
        params.push(format!("dn={}", urlencoding::encode_binary(info.name())));
    }

    if options.exact_length {
        params.push(format!("xl={}", info.total_length()?));
    }

    if options.web_seeds {
        if let Some(url_list) = metadata.url_list() {
            for url in url_list.urls() {
                params.push(format!("ws={}", urlencoding::encode_binary(url)));
            }
        }
    }

    if options.trackers {
        for url in metadata.trackers(options.only_first_tier) {
            params.push(format!("tr={}", urlencoding::encode_binary(url)));
        }
    }

    tracing::debug!("built magnet link with {} parameters", params.len());

    Ok(format!("magnet:?{}", params.join("&")))
}
