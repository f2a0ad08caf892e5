use super::error::InvariantError;
use super::schema::InfoDictionary;

/// The layout of a torrent's info dictionary.
///
/// - **V1**: Original BitTorrent protocol (BEP-3), SHA1 info hash
/// - **V2**: BitTorrent v2 (BEP-52), SHA256 info hash
/// - **Hybrid**: Carries both layouts for the same content (BEP-47)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentFormat {
    V1,
    V2,
    Hybrid,
}

impl TorrentFormat {
    /// Classifies an info dictionary by its `meta version` and `files` fields.
    ///
    /// A missing `meta version` means v1. Version 2 without `files` is v2 and
    /// with `files` is hybrid. Any other version is rejected rather than
    /// treated as v1.
    pub fn classify(info: &InfoDictionary) -> Result<Self, InvariantError> {
        match info.meta_version() {
            None => Ok(TorrentFormat::V1),
            Some(2) if info.files().is_none() => Ok(TorrentFormat::V2),
            Some(2) => Ok(TorrentFormat::Hybrid),
            Some(other) => Err(InvariantError::UnknownMetaVersion(other)),
        }
    }

    /// Returns true if this format carries a v1 info hash.
    pub fn has_v1(&self) -> bool {
        matches!(self, TorrentFormat::V1 | TorrentFormat::Hybrid)
    }

    /// Returns true if this format carries a v2 info hash.
    pub fn has_v2(&self) -> bool {
        matches!(self, TorrentFormat::V2 | TorrentFormat::Hybrid)
    }

    /// Checks that the fields this format depends on are all present.
    ///
    /// v1 needs `pieces` plus either `files` or `length`; v2 needs `file tree`,
    /// `meta version` and the top-level `piece layers`; hybrid needs both sets.
    pub(crate) fn check_required(
        &self,
        info: &InfoDictionary,
        has_piece_layers: bool,
    ) -> Result<(), InvariantError> {
        let missing = |field| InvariantError::MissingField {
            format: *self,
            field,
        };

        if self.has_v1() {
            if info.pieces().is_none() {
                return Err(missing("pieces"));
            }
            if info.files().is_none() && info.length().is_none() {
                return Err(missing("files or length"));
            }
        }

        if self.has_v2() {
            if info.file_tree().is_none() {
                return Err(missing("file tree"));
            }
            if info.meta_version().is_none() {
                return Err(missing("meta version"));
            }
            if !has_piece_layers {
                return Err(missing("piece layers"));
            }
        }

        Ok(())
    }
}
