use super::format::TorrentFormat;
use sha1::{Digest, Sha1};
use sha2::Sha256;
use std::fmt;

/// Multihash prefix for a SHA256 digest: function code 0x12, length 0x20.
pub const SHA256_MULTIHASH_PREFIX: &str = "1220";

/// v1 info hash: SHA1 of the bencoded info dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHashV1([u8; 20]);

/// v2 info hash: SHA256 of the bencoded info dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHashV2([u8; 32]);

impl InfoHashV1 {
    pub fn from_info_bytes(raw_info: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(raw_info);
        Self(hasher.finalize().into())
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        hex_decode(s)?.try_into().ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl InfoHashV2 {
    pub fn from_info_bytes(raw_info: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(raw_info);
        Self(hasher.finalize().into())
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        hex_decode(s)?.try_into().ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    /// Hex multihash form used in `urn:btmh:` magnet parameters.
    pub fn to_multihash_hex(&self) -> String {
        format!("{}{}", SHA256_MULTIHASH_PREFIX, self.to_hex())
    }
}

impl fmt::Debug for InfoHashV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHashV1({})", self.to_hex())
    }
}

impl fmt::Display for InfoHashV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for InfoHashV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHashV2({})", self.to_hex())
    }
}

impl fmt::Display for InfoHashV2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Format and info hash(es) derived from a torrent's info dictionary.
///
/// V1 torrents carry only `hash_v1`, V2 only `hash_v2`, hybrids both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedInfo {
    format: TorrentFormat,
    hash_v1: Option<InfoHashV1>,
    hash_v2: Option<InfoHashV2>,
}

impl ComputedInfo {
    /// Hashes the bencoded info dictionary with the digests `format` calls for.
    pub fn compute(format: TorrentFormat, raw_info: &[u8]) -> Self {
        Self {
            format,
            hash_v1: format
                .has_v1()
                .then(|| InfoHashV1::from_info_bytes(raw_info)),
            hash_v2: format
                .has_v2()
                .then(|| InfoHashV2::from_info_bytes(raw_info)),
        }
    }

    pub fn format(&self) -> TorrentFormat {
        self.format
    }

    pub fn hash_v1(&self) -> Option<&InfoHashV1> {
        self.hash_v1.as_ref()
    }

    pub fn hash_v2(&self) -> Option<&InfoHashV2> {
        self.hash_v2.as_ref()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
