use std::collections::BTreeMap;

use canopy_value::Value;

/// Version written into the root envelope. Bump only with a migration plan:
/// deltas encoded with this format are persisted and transmitted.
pub const FORMAT_VERSION: u32 = 1;

/// Encode a tree (plain or delta) into its wire representation.
pub fn serialize(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
    encode_node(&mut buf, value);
    buf
}

pub(crate) fn encode_node(buf: &mut Vec<u8>, value: &Value) {
    buf.push(value.kind().tag());
    match value {
        Value::Absent | Value::Noop | Value::Delete => {}
        Value::Bool(v) => buf.push(u8::from(*v)),
        Value::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Int64(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Ref(r) => buf.extend_from_slice(&r.raw().to_be_bytes()),
        Value::Float(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Vector2i(v) => {
            buf.extend_from_slice(&v.x.to_be_bytes());
            buf.extend_from_slice(&v.y.to_be_bytes());
        }
        Value::Vector2f(v) => {
            buf.extend_from_slice(&v.x.to_be_bytes());
            buf.extend_from_slice(&v.y.to_be_bytes());
        }
        Value::String(s) => encode_str(buf, s),
        Value::Bytes(b) => {
            buf.extend_from_slice(&(b.len() as u32).to_be_bytes());
            buf.extend_from_slice(b);
        }
        Value::Sequence(items) => encode_items(buf, items),
        Value::Map(entries) => encode_entries(buf, entries),
        // IndexRange reuses the two-int vector payload slot.
        Value::IndexRange { start, len } => {
            buf.extend_from_slice(&start.to_be_bytes());
            buf.extend_from_slice(&len.to_be_bytes());
        }
        Value::DeltaMap { entries, anchor } => {
            encode_entries(buf, entries);
            buf.extend_from_slice(&anchor.to_be_bytes());
        }
        Value::DeltaSequence { items, anchor } => {
            encode_items(buf, items);
            buf.extend_from_slice(&anchor.to_be_bytes());
        }
    }
}

fn encode_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn encode_items(buf: &mut Vec<u8>, items: &[Value]) {
    buf.extend_from_slice(&(items.len() as u32).to_be_bytes());
    for item in items {
        encode_node(buf, item);
    }
}

fn encode_entries(buf: &mut Vec<u8>, entries: &BTreeMap<String, Value>) {
    buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for (key, entry) in entries {
        encode_str(buf, key);
        encode_node(buf, entry);
    }
}
