use bytes::Bytes;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(decode(b"i-0e").is_err());
    assert!(decode(b"i03e").is_err());
    assert!(decode(b"ie").is_err());
    assert!(decode(b"i+3e").is_err());
    assert!(decode(b"i42").is_err());
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Bytes::from_static(b"")));
    assert!(decode(b"5:spam").is_err());
    assert!(decode(b"04:spam").is_err());
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    match result {
        Value::List(l) => {
            assert_eq!(l.len(), 2);
            assert_eq!(l[0], Value::Bytes(Bytes::from_static(b"spam")));
            assert_eq!(l[1], Value::Integer(42));
        }
        _ => panic!("expected list"),
    }
}

#[test]
fn test_decode_dict_keeps_wire_order() {
    let result = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
    let dict = result.as_dict().unwrap();
    let keys: Vec<&[u8]> = dict.keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec![b"spam".as_slice(), b"cow".as_slice()]);
    assert_eq!(
        dict.get(b"cow".as_slice()),
        Some(&Value::Bytes(Bytes::from_static(b"moo")))
    );
}

#[test]
fn test_decode_dict_rejects_bad_keys() {
    assert!(matches!(
        decode(b"di1e3:fooe"),
        Err(BencodeError::NonStringKey)
    ));
    assert!(matches!(
        decode(b"d3:fooi1e3:fooi2ee"),
        Err(BencodeError::DuplicateKey)
    ));
}

#[test]
fn test_nesting_limit() {
    assert!(decode_with_limit(b"llleee", 2).is_ok());
    assert!(matches!(
        decode_with_limit(b"lllleeee", 2),
        Err(BencodeError::NestingTooDeep(2))
    ));

    let deep = format!("{}{}", "l".repeat(MAX_DEPTH + 2), "e".repeat(MAX_DEPTH + 2));
    assert!(matches!(
        decode(deep.as_bytes()),
        Err(BencodeError::NestingTooDeep(_))
    ));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)).unwrap(), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)).unwrap(), b"i0e");
}

#[test]
fn test_encode_dict_in_insertion_order() {
    let mut dict = Dict::new();
    dict.insert(Bytes::from_static(b"zeta"), Value::Integer(1));
    dict.insert(Bytes::from_static(b"alpha"), Value::string("x"));
    assert_eq!(
        encode(&Value::Dict(dict)).unwrap(),
        b"d4:zetai1e5:alpha1:xe"
    );
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_roundtrip_unsorted_keys() {
    let original = b"d4:infod12:piece lengthi1e4:name1:ae8:announce3:urle";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded).unwrap(), original);
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData)
    ));
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert_eq!(value.kind(), "list");
}

#[test]
fn test_value_depth_matches_decode_limit() {
    assert_eq!(Value::Integer(1).depth(), 0);
    assert_eq!(decode(b"le").unwrap().depth(), 0);

    let value = decode(b"d1:ali1ee1:bl1:xee").unwrap();
    assert_eq!(value.depth(), 2);
    assert!(decode_with_limit(b"d1:ali1ee1:bl1:xee", 2).is_ok());
    assert!(decode_with_limit(b"d1:ali1ee1:bl1:xee", 1).is_err());
}
