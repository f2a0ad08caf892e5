//! Typed, read-only view of a torrent document.
//!
//! Validation walks the decoded dictionaries once, mapping the on-wire field
//! names (`piece length`, `announce-list`, ...) onto typed fields and checking
//! each value's shape. The first mismatch is reported with its field path.
//! Keys the schema does not know are kept in an `extra` map so that nothing in
//! the document is lost. Cross-field rules (format requirements, `files` vs
//! `length`) are checked afterwards by [`Torrent`](super::Torrent).

use bytes::Bytes;
use indexmap::IndexMap;

use super::error::{FieldPath, TorrentError};
use super::file_tree::{FileRecord, FileTreeNode};
use crate::bencode::{Dict, Value};

/// Top-level fields of a torrent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMetadata {
    announce: Option<Bytes>,
    announce_list: Option<Vec<Vec<Bytes>>>,
    comment: Option<Bytes>,
    created_by: Option<Bytes>,
    creation_date: Option<i64>,
    info: InfoDictionary,
    url_list: Option<UrlList>,
    piece_layers: Option<IndexMap<Bytes, Bytes>>,
    extra: Dict,
}

/// The `info` dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoDictionary {
    name: Bytes,
    piece_length: i64,
    source: Option<Bytes>,
    length: Option<i64>,
    files: Option<Vec<FileRecord>>,
    pieces: Option<Bytes>,
    file_tree: Option<FileTreeNode>,
    meta_version: Option<i64>,
    extra: Dict,
}

/// The `url-list` field ([BEP-19](http://bittorrent.org/beps/bep_0019.html)),
/// which creators write either as one string or as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlList {
    Single(Bytes),
    Many(Vec<Bytes>),
}

impl UrlList {
    /// The web seed URLs in document order.
    pub fn urls(&self) -> &[Bytes] {
        match self {
            UrlList::Single(url) => std::slice::from_ref(url),
            UrlList::Many(urls) => urls,
        }
    }

    fn from_value(value: &Value, path: &FieldPath) -> Result<Self, TorrentError> {
        match value {
            Value::Bytes(url) => Ok(UrlList::Single(url.clone())),
            Value::List(_) => expect_byte_list(value, path).map(UrlList::Many),
            other => Err(TorrentError::wrong_type(
                path.clone(),
                "byte string or list",
                other.kind(),
            )),
        }
    }
}

impl TorrentMetadata {
    pub(crate) fn from_dict(dict: &Dict) -> Result<Self, TorrentError> {
        let root = FieldPath::root();

        let mut announce = None;
        let mut announce_list = None;
        let mut comment = None;
        let mut created_by = None;
        let mut creation_date = None;
        let mut info = None;
        let mut url_list = None;
        let mut piece_layers = None;
        let mut extra = Dict::new();

        for (key, value) in dict {
            let path = root.key(key);
            match &key[..] {
                b"announce" => announce = Some(expect_bytes(value, &path)?),
                b"announce-list" => announce_list = Some(expect_tiers(value, &path)?),
                b"comment" => comment = Some(expect_bytes(value, &path)?),
                b"created by" => created_by = Some(expect_bytes(value, &path)?),
                b"creation date" => creation_date = Some(expect_integer(value, &path)?),
                b"info" => info = Some(InfoDictionary::from_value(value, &path)?),
                b"url-list" => url_list = Some(UrlList::from_value(value, &path)?),
                b"piece layers" => piece_layers = Some(expect_byte_map(value, &path)?),
                _ => {
                    tracing::trace!("keeping unknown field {}", path);
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Self {
            announce,
            announce_list,
            comment,
            created_by,
            creation_date,
            info: info.ok_or_else(|| TorrentError::missing(root.key(b"info")))?,
            url_list,
            piece_layers,
            extra,
        })
    }

    /// Primary tracker URL.
    pub fn announce(&self) -> Option<&Bytes> {
        self.announce.as_ref()
    }

    /// Tracker tiers ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub fn announce_list(&self) -> Option<&[Vec<Bytes>]> {
        self.announce_list.as_deref()
    }

    pub fn comment(&self) -> Option<&Bytes> {
        self.comment.as_ref()
    }

    pub fn created_by(&self) -> Option<&Bytes> {
        self.created_by.as_ref()
    }

    /// Unix timestamp when the torrent was created.
    pub fn creation_date(&self) -> Option<i64> {
        self.creation_date
    }

    pub fn info(&self) -> &InfoDictionary {
        &self.info
    }

    pub fn url_list(&self) -> Option<&UrlList> {
        self.url_list.as_ref()
    }

    /// v2 piece layers, keyed by each file's `pieces root`.
    pub fn piece_layers(&self) -> Option<&IndexMap<Bytes, Bytes>> {
        self.piece_layers.as_ref()
    }

    /// Top-level fields not covered by the schema, in document order.
    pub fn extra(&self) -> &Dict {
        &self.extra
    }

    /// Tracker URLs flattened tier by tier.
    ///
    /// Uses `announce-list` when it has any tiers, otherwise `announce` alone.
    /// With `first_tier_only`, only the first tier is returned.
    pub fn trackers(&self, first_tier_only: bool) -> Vec<&Bytes> {
        let tiers: Vec<&[Bytes]> = match self.announce_list.as_deref() {
            Some(tiers) if !tiers.is_empty() => tiers.iter().map(Vec::as_slice).collect(),
            _ => self.announce.iter().map(std::slice::from_ref).collect(),
        };

        let take = if first_tier_only { 1 } else { tiers.len() };
        tiers.into_iter().take(take).flatten().collect()
    }
}

impl InfoDictionary {
    fn from_value(value: &Value, path: &FieldPath) -> Result<Self, TorrentError> {
        let dict = expect_dict(value, path)?;

        let mut name = None;
        let mut piece_length = None;
        let mut source = None;
        let mut length = None;
        let mut files = None;
        let mut pieces = None;
        let mut file_tree = None;
        let mut meta_version = None;
        let mut extra = Dict::new();

        for (key, value) in dict {
            let path = path.key(key);
            match &key[..] {
                b"name" => name = Some(expect_bytes(value, &path)?),
                b"piece length" => piece_length = Some(expect_integer(value, &path)?),
                b"source" => source = Some(expect_bytes(value, &path)?),
                b"length" => length = Some(expect_length(value, &path)?),
                b"files" => {
                    let records = expect_list(value, &path)?
                        .iter()
                        .enumerate()
                        .map(|(i, file)| FileRecord::from_value(file, &path.index(i)))
                        .collect::<Result<Vec<_>, _>>()?;
                    files = Some(records);
                }
                b"pieces" => pieces = Some(expect_bytes(value, &path)?),
                b"file tree" => file_tree = Some(FileTreeNode::from_value(value, &path)?),
                b"meta version" => meta_version = Some(expect_integer(value, &path)?),
                _ => {
                    tracing::trace!("keeping unknown field {}", path);
                    extra.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(Self {
            name: name.ok_or_else(|| TorrentError::missing(path.key(b"name")))?,
            piece_length: piece_length
                .ok_or_else(|| TorrentError::missing(path.key(b"piece length")))?,
            source,
            length,
            files,
            pieces,
            file_tree,
            meta_version,
            extra,
        })
    }

    /// Suggested name for the file or top-level directory.
    pub fn name(&self) -> &Bytes {
        &self.name
    }

    /// Number of bytes per piece.
    pub fn piece_length(&self) -> i64 {
        self.piece_length
    }

    pub fn source(&self) -> Option<&Bytes> {
        self.source.as_ref()
    }

    /// Length of a v1 single-file torrent.
    pub fn length(&self) -> Option<i64> {
        self.length
    }

    /// File list of a v1 multi-file torrent.
    pub fn files(&self) -> Option<&[FileRecord]> {
        self.files.as_deref()
    }

    /// Concatenated 20-byte SHA1 piece hashes (v1).
    pub fn pieces(&self) -> Option<&Bytes> {
        self.pieces.as_ref()
    }

    pub fn file_tree(&self) -> Option<&FileTreeNode> {
        self.file_tree.as_ref()
    }

    pub fn meta_version(&self) -> Option<i64> {
        self.meta_version
    }

    /// Fields of the info dictionary not covered by the schema (e.g. `private`).
    pub fn extra(&self) -> &Dict {
        &self.extra
    }
}

fn expect_bytes(value: &Value, path: &FieldPath) -> Result<Bytes, TorrentError> {
    value
        .as_bytes()
        .cloned()
        .ok_or_else(|| TorrentError::wrong_type(path.clone(), "byte string", value.kind()))
}

fn expect_integer(value: &Value, path: &FieldPath) -> Result<i64, TorrentError> {
    value
        .as_integer()
        .ok_or_else(|| TorrentError::wrong_type(path.clone(), "integer", value.kind()))
}

fn expect_length(value: &Value, path: &FieldPath) -> Result<i64, TorrentError> {
    match expect_integer(value, path)? {
        n if n < 0 => Err(TorrentError::negative(path.clone(), n)),
        n => Ok(n),
    }
}

fn expect_list<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Vec<Value>, TorrentError> {
    value
        .as_list()
        .ok_or_else(|| TorrentError::wrong_type(path.clone(), "list", value.kind()))
}

fn expect_dict<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Dict, TorrentError> {
    value
        .as_dict()
        .ok_or_else(|| TorrentError::wrong_type(path.clone(), "dictionary", value.kind()))
}

fn expect_byte_list(value: &Value, path: &FieldPath) -> Result<Vec<Bytes>, TorrentError> {
    expect_list(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| expect_bytes(item, &path.index(i)))
        .collect()
}

fn expect_tiers(value: &Value, path: &FieldPath) -> Result<Vec<Vec<Bytes>>, TorrentError> {
    expect_list(value, path)?
        .iter()
        .enumerate()
        .map(|(i, tier)| expect_byte_list(tier, &path.index(i)))
        .collect()
}

fn expect_byte_map(
    value: &Value,
    path: &FieldPath,
) -> Result<IndexMap<Bytes, Bytes>, TorrentError> {
    expect_dict(value, path)?
        .iter()
        .map(|(key, item)| expect_bytes(item, &path.key(key)).map(|bytes| (key.clone(), bytes)))
        .collect()
}
