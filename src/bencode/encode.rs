use super::error::BencodeError;
use super::value::Value;
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// The output is the canonical bencode form of the value:
/// - Integers: `i<number>e`, no leading zeros
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, entries in stored order
///
/// Dictionaries are written in the order their entries are stored, which for a
/// decoded value is the order they appeared on the wire. Decoding and
/// re-encoding output from a compliant encoder therefore reproduces it byte for
/// byte.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
///
/// # Examples
///
/// ```
/// use torinfo::bencode::{decode, encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
/// assert_eq!(encode(&Value::string("hello")).unwrap(), b"5:hello");
///
/// let original = b"d4:spami1e3:cow3:mooe";
/// let value = decode(original).unwrap();
/// assert_eq!(encode(&value).unwrap(), original);
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf)?;
    Ok(buf)
}

fn encode_value<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Value::Bytes(b) => encode_bytes(b, writer)?,
        Value::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                encode_value(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(d) => {
            writer.write_all(b"d")?;
            for (key, val) in d {
                encode_bytes(key, writer)?;
                encode_value(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn encode_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> Result<(), BencodeError> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)?;
    Ok(())
}
