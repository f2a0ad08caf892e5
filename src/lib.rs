//! torinfo - BitTorrent metainfo inspection
//!
//! Validates `.torrent` documents (v1, v2 and hybrid), computes their info
//! hashes and builds magnet links from them. No networking and no piece
//! verification.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - BEP-3/9/52 torrent validation, info hashes, magnet links

pub mod bencode;
pub mod metainfo;

pub use bencode::{decode, encode, BencodeError, Value};
pub use metainfo::{
    InfoHashV1, InfoHashV2, MagnetOptions, ParseOptions, Torrent, TorrentError, TorrentFormat,
    TorrentMetadata,
};
