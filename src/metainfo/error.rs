use std::fmt;

use thiserror::Error;

use super::format::TorrentFormat;
use crate::bencode::BencodeError;

/// Errors that can occur when loading a torrent or deriving data from it.
///
/// Any of these fails construction as a whole; a [`Torrent`](super::Torrent)
/// is either fully validated and hashed or not built at all.
#[derive(Debug, Error)]
pub enum TorrentError {
    /// The input is not valid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The decoded document does not have the shape of a torrent at all.
    #[error("structural error: {0}")]
    Structural(StructuralError),

    /// A field has the wrong type, or a required field is missing.
    #[error("schema error at `{path}`: {kind}")]
    Schema {
        path: FieldPath,
        kind: SchemaErrorKind,
    },

    /// The fields are individually well-formed but do not form a valid torrent.
    #[error("invariant violated: {0}")]
    Invariant(InvariantError),

    /// Reading the torrent file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TorrentError {
    pub(crate) fn missing(path: FieldPath) -> Self {
        TorrentError::Schema {
            path,
            kind: SchemaErrorKind::Missing,
        }
    }

    pub(crate) fn negative(path: FieldPath, value: i64) -> Self {
        TorrentError::Schema {
            path,
            kind: SchemaErrorKind::Negative(value),
        }
    }

    pub(crate) fn wrong_type(path: FieldPath, expected: &'static str, found: &'static str) -> Self {
        TorrentError::Schema {
            path,
            kind: SchemaErrorKind::WrongType { expected, found },
        }
    }
}

impl From<InvariantError> for TorrentError {
    fn from(e: InvariantError) -> Self {
        TorrentError::Invariant(e)
    }
}

impl From<StructuralError> for TorrentError {
    fn from(e: StructuralError) -> Self {
        TorrentError::Structural(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("top-level value is not a dictionary")]
    NotADictionary,

    #[error("dictionary key is not a byte string")]
    NonByteStringKey,

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaErrorKind {
    #[error("required field is missing")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a non-negative integer, found {0}")]
    Negative(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("`files` and `length` are both present")]
    FilesAndLength,

    #[error("{format:?} torrent requires `{field}`")]
    MissingField {
        format: TorrentFormat,
        field: &'static str,
    },

    #[error("total length is negative or overflows i64")]
    LengthOverflow,

    #[error("unknown meta version {0}")]
    UnknownMetaVersion(i64),

    /// Neither `file tree` nor `files`/`length` yields a total size. A validated
    /// torrent never reaches this.
    #[error("no length source in info dictionary")]
    NoLengthSource,
}

/// Location of a field inside the torrent document, e.g. `info.files[1].length`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a dictionary key appended.
    pub fn key(&self, key: &[u8]) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(String::from_utf8_lossy(key).into_owned()));
        Self(segments)
    }

    /// Returns a new path with a list index appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
