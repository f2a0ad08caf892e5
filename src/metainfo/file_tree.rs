//! File records and the BitTorrent v2 file tree (BEP-52).

use bytes::Bytes;
use indexmap::IndexMap;

use super::error::{FieldPath, TorrentError};
use crate::bencode::{Dict, Value};

/// A single file entry: `length` plus whatever else its creator stored
/// (`path`, `pieces root`, `attr`, ...). Unrecognised keys are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    fields: Dict,
}

impl FileRecord {
    pub(crate) fn from_value(value: &Value, path: &FieldPath) -> Result<Self, TorrentError> {
        let fields = value
            .as_dict()
            .ok_or_else(|| TorrentError::wrong_type(path.clone(), "dictionary", value.kind()))?;

        if let Some(length) = fields.get(b"length".as_slice()) {
            match length.as_integer() {
                Some(n) if n < 0 => return Err(TorrentError::negative(path.key(b"length"), n)),
                Some(_) => {}
                None => {
                    return Err(TorrentError::wrong_type(
                        path.key(b"length"),
                        "integer",
                        length.kind(),
                    ))
                }
            }
        }

        if let Some(segments) = fields.get(b"path".as_slice()) {
            let path = path.key(b"path");
            let list = segments
                .as_list()
                .ok_or_else(|| TorrentError::wrong_type(path.clone(), "list", segments.kind()))?;
            for (i, segment) in list.iter().enumerate() {
                if segment.as_bytes().is_none() {
                    return Err(TorrentError::wrong_type(
                        path.index(i),
                        "byte string",
                        segment.kind(),
                    ));
                }
            }
        }

        Ok(Self {
            fields: fields.clone(),
        })
    }

    /// The file's `length`, if the record carries one at its top level.
    pub fn length(&self) -> Option<i64> {
        self.fields.get(b"length".as_slice())?.as_integer()
    }

    /// Path components of a v1 multi-file entry.
    pub fn path(&self) -> Option<Vec<&Bytes>> {
        self.fields
            .get(b"path".as_slice())?
            .as_list()?
            .iter()
            .map(Value::as_bytes)
            .collect()
    }

    /// Merkle root of a v2 file (32 bytes for non-empty files).
    pub fn pieces_root(&self) -> Option<&Bytes> {
        self.fields.get(b"pieces root".as_slice())?.as_bytes()
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields of the record, in their original order.
    pub fn fields(&self) -> &Dict {
        &self.fields
    }
}

/// A node of a v2 `file tree`.
///
/// Directories map path segments to child nodes. A file sits under the empty
/// key of the directory named after it: `{"a.txt": {"": {"length": 3}}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeNode {
    Directory(IndexMap<Bytes, FileTreeNode>),
    File(FileRecord),
}

impl FileTreeNode {
    /// Parses a node. A dictionary holding an integer `length` is a file
    /// record; any other dictionary is a directory whose values must all be
    /// nodes, so a file or directory may itself be named `length`.
    pub(crate) fn from_value(value: &Value, path: &FieldPath) -> Result<Self, TorrentError> {
        let dict = value
            .as_dict()
            .ok_or_else(|| TorrentError::wrong_type(path.clone(), "dictionary", value.kind()))?;

        if matches!(dict.get(b"length".as_slice()), Some(Value::Integer(_))) {
            return FileRecord::from_value(value, path).map(FileTreeNode::File);
        }

        let mut children = IndexMap::with_capacity(dict.len());
        for (name, child) in dict {
            children.insert(name.clone(), Self::from_value(child, &path.key(name))?);
        }

        Ok(FileTreeNode::Directory(children))
    }

    pub fn as_file(&self) -> Option<&FileRecord> {
        match self {
            FileTreeNode::File(record) => Some(record),
            FileTreeNode::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&IndexMap<Bytes, FileTreeNode>> {
        match self {
            FileTreeNode::File(_) => None,
            FileTreeNode::Directory(children) => Some(children),
        }
    }

    /// Lists every file in the tree with its path segments, in tree order.
    ///
    /// The empty key that marks a file is not part of its path.
    pub fn flatten(&self) -> Vec<(Vec<Bytes>, &FileRecord)> {
        let mut files = Vec::new();
        flatten_recursive(self, Vec::new(), &mut files);
        files
    }
}

fn flatten_recursive<'a>(
    node: &'a FileTreeNode,
    current_path: Vec<Bytes>,
    files: &mut Vec<(Vec<Bytes>, &'a FileRecord)>,
) {
    match node {
        FileTreeNode::File(record) => files.push((current_path, record)),
        FileTreeNode::Directory(children) => {
            for (name, child) in children {
                let mut child_path = current_path.clone();
                if !name.is_empty() {
                    child_path.push(name.clone());
                }
                flatten_recursive(child, child_path, files);
            }
        }
    }
}
