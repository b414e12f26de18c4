use std::collections::BTreeMap;

use canopy_value::Value;

use crate::breadcrumb::Breadcrumb;
use crate::error::{DeltaError, DeltaResult};
use crate::hints::DeltaHints;

/// Compute the delta that transforms `from` into `to`.
///
/// The result is a `Value` tree built from the delta-only variants; feed it
/// to [`apply_delta`](crate::apply_delta) against a copy of `from` (or any
/// structurally compatible base) to reconstruct `to`. `Value::Noop` means
/// the trees are equivalent under the supplied hints.
pub fn create_delta(from: &Value, to: &Value, hints: &dyn DeltaHints) -> DeltaResult<Value> {
    tracing::trace!(from = %from.kind(), to = %to.kind(), "creating delta");
    diff_node(from, to, hints, &Breadcrumb::root())
}

fn input_err(path: &Breadcrumb<'_>, value: &Value) -> DeltaError {
    DeltaError::DeltaVariantInInput {
        path: path.render(),
        kind: value.kind(),
    }
}

fn diff_node(
    from: &Value,
    to: &Value,
    hints: &dyn DeltaHints,
    path: &Breadcrumb<'_>,
) -> DeltaResult<Value> {
    // Field-level serializers mark fields irrelevant to this delta stream
    // with the skip sentinel.
    if matches!(to, Value::Noop) {
        return Ok(Value::Noop);
    }
    if from.is_delta() {
        return Err(input_err(path, from));
    }
    if to.is_delta() {
        return Err(input_err(path, to));
    }
    if hints.should_bypass(path) {
        return Ok(Value::Noop);
    }
    match (from, to) {
        (Value::Map(from_entries), Value::Map(to_entries)) => {
            diff_map(from_entries, to_entries, hints, path)
        }
        (Value::Sequence(from_items), Value::Sequence(to_items)) => {
            diff_sequence(from_items, to_items, hints, path)
        }
        _ => {
            if from == to {
                return Ok(Value::Noop);
            }
            let one_side_absent_other_empty = (from.is_absent() && to.is_null_or_empty())
                || (to.is_absent() && from.is_null_or_empty());
            if one_side_absent_other_empty && hints.null_empty_equivalent(path) {
                return Ok(Value::Noop);
            }
            // Scalar or variant-type change: full replacement.
            Ok(to.clone())
        }
    }
}

fn diff_map(
    from: &BTreeMap<String, Value>,
    to: &BTreeMap<String, Value>,
    hints: &dyn DeltaHints,
    path: &Breadcrumb<'_>,
) -> DeltaResult<Value> {
    // Nothing to diff against: the whole target map is the delta.
    if from.is_empty() {
        let mut entries = BTreeMap::new();
        for (key, to_value) in to {
            if matches!(to_value, Value::Noop) {
                continue;
            }
            if to_value.is_delta() {
                return Err(input_err(&path.child_key(key), to_value));
            }
            entries.insert(key.clone(), to_value.clone());
        }
        if entries.is_empty() {
            return Ok(Value::Noop);
        }
        return Ok(Value::DeltaMap {
            entries,
            anchor: -1,
        });
    }

    let mut entries = BTreeMap::new();
    for (key, to_value) in to {
        if matches!(to_value, Value::Noop) {
            continue;
        }
        let child = path.child_key(key);
        match from.get(key) {
            Some(from_value) => {
                let delta = diff_node(from_value, to_value, hints, &child)?;
                if !matches!(delta, Value::Noop) {
                    entries.insert(key.clone(), delta);
                }
            }
            None => {
                if to_value.is_delta() {
                    return Err(input_err(&child, to_value));
                }
                entries.insert(key.clone(), to_value.clone());
            }
        }
    }
    for key in from.keys() {
        if !to.contains_key(key) && hints.can_delete_key(key, path) {
            entries.insert(key.clone(), Value::Delete);
        }
    }

    if entries.is_empty() {
        Ok(Value::Noop)
    } else {
        Ok(Value::DeltaMap {
            entries,
            anchor: -1,
        })
    }
}

fn diff_sequence(
    from: &[Value],
    to: &[Value],
    hints: &dyn DeltaHints,
    path: &Breadcrumb<'_>,
) -> DeltaResult<Value> {
    // Equal sequences are Noop regardless of how the policy matches
    // elements; this keeps the identity property even for policies that
    // decline to match (and store literals) for identical elements.
    if from == to {
        return Ok(Value::Noop);
    }

    let mut items: Vec<Value> = Vec::new();
    let mut all_references = true;
    // Per-base-index use counts, for the permutation collapse below.
    let mut used = vec![0usize; from.len()];

    for (index, element) in to.iter().enumerate() {
        if element.is_delta() {
            return Err(input_err(&path.child_index(index), element));
        }
        let matched = hints
            .sequence_match(from, element, index, path)
            .filter(|&m| m < from.len());
        match matched {
            Some(base_index) => {
                let child = path.child_index(index);
                let delta = diff_node(&from[base_index], element, hints, &child)?;
                if matches!(delta, Value::Noop) {
                    used[base_index] += 1;
                    // Extend the previous run when this match is contiguous
                    // with it.
                    if let Some(Value::IndexRange { start, len }) = items.last_mut() {
                        if *start as usize + *len as usize == base_index {
                            *len += 1;
                            continue;
                        }
                    }
                    items.push(Value::IndexRange {
                        start: base_index as u32,
                        len: 1,
                    });
                } else {
                    all_references = false;
                    items.push(anchored(delta, base_index));
                }
            }
            None => {
                all_references = false;
                items.push(element.clone());
            }
        }
    }

    // One run covering the whole base in order: unchanged.
    if let [Value::IndexRange { start: 0, len }] = items.as_slice() {
        if *len as usize == from.len() {
            return Ok(Value::Noop);
        }
    }
    // Pure reordering (each base element referenced exactly once) collapses
    // when the policy says order is irrelevant here.
    if all_references
        && to.len() == from.len()
        && used.iter().all(|&count| count == 1)
        && !hints.sequence_order_matters(path)
    {
        return Ok(Value::Noop);
    }

    Ok(Value::DeltaSequence { items, anchor: -1 })
}

/// Stamp a nested delta with the base index it was diffed against, so
/// application can re-anchor it inside the original base sequence.
fn anchored(mut delta: Value, base_index: usize) -> Value {
    if let Value::DeltaMap { anchor, .. } | Value::DeltaSequence { anchor, .. } = &mut delta {
        *anchor = base_index as i64;
    }
    delta
}
