use std::path::Path;

use bytes::Bytes;

use super::error::{FieldPath, InvariantError, StructuralError, TorrentError};
use super::format::TorrentFormat;
use super::info_hash::{ComputedInfo, InfoHashV1, InfoHashV2};
use super::magnet::{build_magnet, MagnetOptions};
use super::schema::TorrentMetadata;
use crate::bencode::{decode_with_limit, encode, BencodeError, Value, MAX_DEPTH};

/// Limits applied while loading a torrent.
///
/// # Examples
///
/// ```
/// use torinfo::metainfo::{ParseOptions, Torrent, TorrentError};
///
/// let options = ParseOptions::default().max_depth(1);
/// let result = Torrent::from_bytes_with(b"d4:infod4:name1:aee", &options);
/// assert!(matches!(result, Err(TorrentError::Structural(_))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Maximum nesting of lists and dictionaries, the top-level dictionary
    /// being depth 0. Deeper documents fail with a structural error.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A validated torrent file together with its format and info hash(es).
///
/// Instances are immutable: every constructor decodes or takes a complete
/// document, validates it, and hashes its info dictionary in one go. To change
/// a torrent, edit the raw [`Value`] and build a new instance with
/// [`Torrent::from_value`].
///
/// # Examples
///
/// ```
/// use torinfo::metainfo::{MagnetOptions, Torrent, TorrentFormat};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = b"d8:announce15:http://t.ex/ann4:infod6:lengthi5e4:name1:a12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
/// let torrent = Torrent::from_bytes(data)?;
///
/// assert_eq!(torrent.format(), TorrentFormat::V1);
/// assert_eq!(torrent.total_length()?, 5);
///
/// let magnet = torrent.magnet(&MagnetOptions::default().trackers(false))?;
/// assert!(magnet.starts_with("magnet:?xt=urn:btih:"));
/// assert!(magnet.ends_with("&dn=a&xl=5"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Torrent {
    raw: Value,
    raw_info: Bytes,
    metadata: TorrentMetadata,
    computed: ComputedInfo,
}

impl Torrent {
    /// Parses and validates a torrent from raw bytes.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not bencode, the document is not a dictionary,
    /// a field has the wrong type or is missing, or the fields do not form a
    /// valid v1, v2 or hybrid torrent.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TorrentError> {
        Self::from_bytes_with(data, &ParseOptions::default())
    }

    pub fn from_bytes_with(data: &[u8], options: &ParseOptions) -> Result<Self, TorrentError> {
        let value = decode_with_limit(data, options.max_depth).map_err(|e| match e {
            BencodeError::NestingTooDeep(limit) => StructuralError::NestingTooDeep { limit }.into(),
            BencodeError::NonStringKey => StructuralError::NonByteStringKey.into(),
            other => TorrentError::Bencode(other),
        });

        value
            .and_then(|value| Self::from_value_with(value, options))
            .map_err(|e| {
                tracing::warn!("rejected torrent: {}", e);
                e
            })
    }

    /// Reads a `.torrent` file and parses it with [`Torrent::from_bytes`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TorrentError> {
        Self::from_path_with(path, &ParseOptions::default())
    }

    pub fn from_path_with(
        path: impl AsRef<Path>,
        options: &ParseOptions,
    ) -> Result<Self, TorrentError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with(&data, options)
    }

    /// Validates and hashes an already decoded document.
    pub fn from_value(raw: Value) -> Result<Self, TorrentError> {
        Self::from_value_with(raw, &ParseOptions::default())
    }

    /// Like [`Torrent::from_value`], rejecting documents nested deeper than
    /// `options` allows before anything walks them recursively.
    pub fn from_value_with(raw: Value, options: &ParseOptions) -> Result<Self, TorrentError> {
        if raw.depth() > options.max_depth {
            return Err(StructuralError::NestingTooDeep {
                limit: options.max_depth,
            }
            .into());
        }

        let dict = raw.as_dict().ok_or(StructuralError::NotADictionary)?;

        let metadata = TorrentMetadata::from_dict(dict)?;
        let info = metadata.info();

        let format = TorrentFormat::classify(info)?;
        if info.files().is_some() && info.length().is_some() {
            return Err(InvariantError::FilesAndLength.into());
        }
        format.check_required(info, metadata.piece_layers().is_some())?;

        let raw_info = dict
            .get(b"info".as_slice())
            .ok_or_else(|| TorrentError::missing(FieldPath::root().key(b"info")))?;
        let raw_info = Bytes::from(encode(raw_info)?);
        let computed = ComputedInfo::compute(format, &raw_info);

        tracing::debug!(
            "loaded {:?} torrent {} (v1 {:?}, v2 {:?})",
            format,
            String::from_utf8_lossy(info.name()),
            computed.hash_v1(),
            computed.hash_v2()
        );

        Ok(Self {
            raw,
            raw_info,
            metadata,
            computed,
        })
    }

    pub fn format(&self) -> TorrentFormat {
        self.computed.format()
    }

    pub fn computed(&self) -> &ComputedInfo {
        &self.computed
    }

    pub fn hash_v1(&self) -> Option<&InfoHashV1> {
        self.computed.hash_v1()
    }

    pub fn hash_v2(&self) -> Option<&InfoHashV2> {
        self.computed.hash_v2()
    }

    pub fn metadata(&self) -> &TorrentMetadata {
        &self.metadata
    }

    /// The decoded document this torrent was built from, unknown fields included.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The bencoded info dictionary, exactly the bytes that were hashed.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }

    /// Re-encodes the whole document.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TorrentError> {
        Ok(encode(&self.raw)?)
    }

    /// Total content length, from the v2 file tree when there is one.
    pub fn total_length(&self) -> Result<i64, TorrentError> {
        Ok(self.metadata.info().total_length()?)
    }

    pub fn magnet(&self, options: &MagnetOptions) -> Result<String, TorrentError> {
        build_magnet(&self.computed, &self.metadata, options)
    }
}
