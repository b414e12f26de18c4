use std::collections::BTreeMap;

use canopy_value::{Kind, RefId, Value, Vector2f, Vector2i};

use crate::error::{CodecError, CodecResult};
use crate::writer::FORMAT_VERSION;

/// Decode a wire-encoded tree.
///
/// Fails on version skew, unknown tags, truncation, invalid string payloads,
/// and trailing bytes after the root node.
pub fn deserialize(data: &[u8]) -> CodecResult<Value> {
    let mut decoder = Decoder::new(data);
    let version = decoder.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    let value = decoder.read_node()?;
    let remaining = decoder.remaining();
    if remaining != 0 {
        return Err(CodecError::TrailingBytes { remaining });
    }
    Ok(value)
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> CodecResult<u32> {
        Ok(u32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn read_i32(&mut self) -> CodecResult<i32> {
        Ok(i32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    fn read_i64(&mut self) -> CodecResult<i64> {
        Ok(i64::from_be_bytes(self.take(8)?.try_into().unwrap()))
    }

    fn read_f32(&mut self) -> CodecResult<f32> {
        Ok(f32::from_be_bytes(self.take(4)?.try_into().unwrap()))
    }

    /// Read a length/count prefix, rejecting values that cannot possibly fit
    /// in the remaining input (corruption guard before any allocation).
    fn read_len(&mut self) -> CodecResult<usize> {
        let offset = self.pos;
        let len = self.read_u32()? as usize;
        if len > self.remaining() {
            return Err(CodecError::LengthOverflow { offset, len });
        }
        Ok(len)
    }

    fn read_string(&mut self) -> CodecResult<String> {
        let len = self.read_len()?;
        let offset = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { offset })
    }

    fn read_items(&mut self) -> CodecResult<Vec<Value>> {
        let count = self.read_len()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_node()?);
        }
        Ok(items)
    }

    fn read_entries(&mut self) -> CodecResult<BTreeMap<String, Value>> {
        let count = self.read_len()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = self.read_string()?;
            let value = self.read_node()?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    fn read_node(&mut self) -> CodecResult<Value> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        let kind = Kind::from_tag(tag).ok_or(CodecError::UnknownNodeType { tag, offset })?;
        let value = match kind {
            Kind::Absent => Value::Absent,
            Kind::Bool => Value::Bool(self.read_u8()? != 0),
            Kind::Int => Value::Int(self.read_i32()?),
            Kind::Int64 => Value::Int64(self.read_i64()?),
            Kind::Ref => Value::Ref(RefId::new(self.read_i64()?)),
            Kind::Float => Value::Float(self.read_f32()?),
            Kind::Vector2i => {
                let x = self.read_i32()?;
                let y = self.read_i32()?;
                Value::Vector2i(Vector2i::new(x, y))
            }
            Kind::Vector2f => {
                let x = self.read_f32()?;
                let y = self.read_f32()?;
                Value::Vector2f(Vector2f::new(x, y))
            }
            Kind::String => Value::String(self.read_string()?),
            Kind::Bytes => {
                let len = self.read_len()?;
                Value::Bytes(self.take(len)?.to_vec())
            }
            Kind::Sequence => Value::Sequence(self.read_items()?),
            Kind::Map => Value::Map(self.read_entries()?),
            Kind::Noop => Value::Noop,
            Kind::Delete => Value::Delete,
            Kind::IndexRange => {
                let start = self.read_u32()?;
                let len = self.read_u32()?;
                Value::IndexRange { start, len }
            }
            Kind::DeltaMap => {
                let entries = self.read_entries()?;
                let anchor = self.read_i64()?;
                Value::DeltaMap { entries, anchor }
            }
            Kind::DeltaSequence => {
                let items = self.read_items()?;
                let anchor = self.read_i64()?;
                Value::DeltaSequence { items, anchor }
            }
        };
        Ok(value)
    }
}
