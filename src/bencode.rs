//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files. It supports four
//! data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Dictionaries decode into an insertion-ordered map, so a decoded value
//! re-encodes to exactly the bytes it came from whenever those bytes were
//! produced by a compliant encoder. Info hashes depend on that.
//!
//! # Examples
//!
//! ```
//! use torinfo::bencode::{decode, encode, Value};
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//! assert_eq!(encode(&value).unwrap(), b"d3:foo3:bare");
//! ```
//!
//! # Error Handling
//!
//! Malformed input is rejected, never repaired:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NestingTooDeep`] - Nesting limit exceeded
//! - [`BencodeError::NonStringKey`] - Dictionary key that is not a byte string
//! - [`BencodeError::DuplicateKey`] - Same key twice in one dictionary
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_with_limit, MAX_DEPTH};
pub use encode::encode;
pub use error::BencodeError;
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
