//! Total content length of a torrent.

use super::error::InvariantError;
use super::file_tree::FileTreeNode;
use super::schema::InfoDictionary;
use crate::bencode::{Dict, Value};

impl InfoDictionary {
    /// Sum of every file length in the v2 `file tree`.
    ///
    /// `Ok(None)` means there is no file tree, so an empty v2 torrent
    /// (`Ok(Some(0))`) stays distinguishable from a torrent without v2 data.
    pub fn v2_total_length(&self) -> Result<Option<i64>, InvariantError> {
        self.file_tree().map(tree_length).transpose()
    }

    /// Total length from the v1 fields: the sum over `files`, else `length`.
    pub fn v1_total_length(&self) -> Result<Option<i64>, InvariantError> {
        match self.files() {
            Some(files) => files
                .iter()
                .map(|file| dict_length(file.fields()))
                .try_fold(0, |total, length| checked_sum(total, length?))
                .map(Some),
            None => Ok(self.length()),
        }
    }

    /// Total content length, preferring the v2 total over the v1 one.
    ///
    /// Hybrid torrents therefore report their `file tree` total even where it
    /// differs from the v1 file list. Some clients report the v1 total instead.
    pub fn total_length(&self) -> Result<i64, InvariantError> {
        let total = match self.v2_total_length()? {
            Some(total) => Some(total),
            None => self.v1_total_length()?,
        };

        total.ok_or_else(|| {
            tracing::error!("info dictionary has neither file tree nor files/length");
            InvariantError::NoLengthSource
        })
    }
}

fn checked_sum(total: i64, length: i64) -> Result<i64, InvariantError> {
    total
        .checked_add(length)
        .filter(|sum| *sum >= 0)
        .ok_or(InvariantError::LengthOverflow)
}

fn tree_length(node: &FileTreeNode) -> Result<i64, InvariantError> {
    match node {
        FileTreeNode::File(record) => dict_length(record.fields()),
        FileTreeNode::Directory(children) => children
            .values()
            .try_fold(0, |total, child| checked_sum(total, tree_length(child)?)),
    }
}

/// Adds the integer `length` at this level to the lengths found in every
/// nested dictionary. Lists and other scalars contribute nothing.
fn dict_length(dict: &Dict) -> Result<i64, InvariantError> {
    dict.iter().try_fold(0, |total, (key, value)| {
        let length = match value {
            Value::Integer(length) if &key[..] == b"length" => *length,
            Value::Dict(nested) => dict_length(nested)?,
            _ => 0,
        };
        checked_sum(total, length)
    })
}
