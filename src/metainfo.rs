//! Torrent metainfo validation, info hashes and magnet links ([BEP-3], [BEP-9], [BEP-52]).
//!
//! # Overview
//!
//! [`Torrent`] is the entry point. Loading one runs the whole pipeline:
//!
//! 1. decode the bencoded document, keeping dictionary order
//! 2. validate every known field's type into a [`TorrentMetadata`], keeping
//!    unknown fields as they are
//! 3. classify the info dictionary as [`TorrentFormat::V1`], `V2` or `Hybrid`
//!    and check the fields that format requires
//! 4. hash the re-encoded info dictionary with SHA1 (v1) and/or SHA256 (v2)
//!
//! Total size and magnet links are derived on demand from the result.
//!
//! # Examples
//!
//! ```no_run
//! use torinfo::metainfo::{MagnetOptions, Torrent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = Torrent::from_path("example.torrent")?;
//!
//! println!("Format: {:?}", torrent.format());
//! if let Some(hash) = torrent.hash_v1() {
//!     println!("v1 info hash: {}", hash);
//! }
//! if let Some(hash) = torrent.hash_v2() {
//!     println!("v2 info hash: {}", hash);
//! }
//! println!("Total size: {} bytes", torrent.total_length()?);
//!
//! let options = MagnetOptions::default().only_first_tier(true);
//! println!("{}", torrent.magnet(&options)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core metadata, hashed to form the info hash(es)
//!   - `name`, `piece length`, optional `source`
//!   - v1: `pieces` plus `length` (single file) OR `files` (multi-file)
//!   - v2: `file tree` and `meta version` (always 2)
//! - **piece layers** - v2 merkle layers, required for v2 and hybrid
//! - **announce** / **announce-list** - Tracker URL / tracker tiers (BEP-12)
//! - **url-list** - Web seeds (BEP-19)
//! - **comment**, **created by**, **creation date**
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-9]: http://bittorrent.org/beps/bep_0009.html
//! [BEP-52]: http://bittorrent.org/beps/bep_0052.html

mod error;
mod file_tree;
mod format;
mod info_hash;
mod magnet;
mod schema;
mod size;
mod torrent;

pub use error::{FieldPath, InvariantError, SchemaErrorKind, StructuralError, TorrentError};
pub use file_tree::{FileRecord, FileTreeNode};
pub use format::TorrentFormat;
pub use info_hash::{ComputedInfo, InfoHashV1, InfoHashV2, SHA256_MULTIHASH_PREFIX};
pub use magnet::{build_magnet, MagnetOptions};
pub use schema::{InfoDictionary, TorrentMetadata, UrlList};
pub use torrent::{ParseOptions, Torrent};
