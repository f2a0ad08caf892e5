use super::error::BencodeError;
use super::value::{Dict, Value};
use bytes::Bytes;

/// Nesting limit used by [`decode`].
pub const MAX_DEPTH: usize = 64;

/// Decodes a single bencode value, rejecting anything after it.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_with_limit(data, MAX_DEPTH)
}

/// Like [`decode`], with an explicit limit on list/dictionary nesting.
///
/// The top-level value sits at depth 0; a container whose contents would sit
/// deeper than `max_depth` fails with [`BencodeError::NestingTooDeep`].
pub fn decode_with_limit(data: &[u8], max_depth: usize) -> Result<Value, BencodeError> {
    let mut decoder = Decoder {
        data,
        pos: 0,
        max_depth,
    };
    let value = decoder.value(0)?;

    if decoder.pos != data.len() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl Decoder<'_> {
    fn peek(&self) -> Result<u8, BencodeError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEof)
    }

    fn value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > self.max_depth {
            return Err(BencodeError::NestingTooDeep(self.max_depth));
        }

        match self.peek()? {
            b'i' => self.integer(),
            b'l' => self.list(depth),
            b'd' => self.dict(depth),
            b'0'..=b'9' => self.bytes().map(Value::Bytes),
            c => Err(BencodeError::UnexpectedChar(c as char)),
        }
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        self.pos += 1;

        let start = self.pos;
        while self.peek()? != b'e' {
            self.pos += 1;
        }

        let int_str = std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

        if int_str.is_empty() {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }

        if int_str.starts_with("-0") || (int_str.starts_with('0') && int_str.len() > 1) {
            return Err(BencodeError::InvalidInteger("leading zeros".into()));
        }

        if int_str.starts_with('+') {
            return Err(BencodeError::InvalidInteger(int_str.into()));
        }

        let value: i64 = int_str
            .parse()
            .map_err(|_| BencodeError::InvalidInteger(int_str.into()))?;

        self.pos += 1;
        Ok(Value::Integer(value))
    }

    fn bytes(&mut self) -> Result<Bytes, BencodeError> {
        let start = self.pos;
        while self.peek()? != b':' {
            self.pos += 1;
        }

        let len_str = std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| BencodeError::InvalidStringLength)?;

        if len_str.len() > 1 && len_str.starts_with('0') {
            return Err(BencodeError::InvalidStringLength);
        }

        let len: usize = len_str
            .parse()
            .map_err(|_| BencodeError::InvalidStringLength)?;

        self.pos += 1;

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(BencodeError::UnexpectedEof)?;

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;

        Ok(bytes)
    }

    fn list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut list = Vec::new();

        while self.peek()? != b'e' {
            list.push(self.value(depth + 1)?);
        }

        self.pos += 1;
        Ok(Value::List(list))
    }

    fn dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut dict = Dict::new();

        while self.peek()? != b'e' {
            if !self.peek()?.is_ascii_digit() {
                return Err(BencodeError::NonStringKey);
            }
            let key = self.bytes()?;

            let value = self.value(depth + 1)?;
            if dict.insert(key, value).is_some() {
                return Err(BencodeError::DuplicateKey);
            }
        }

        self.pos += 1;
        Ok(Value::Dict(dict))
    }
}
