use canopy_value::Value;

use crate::breadcrumb::Breadcrumb;
use crate::error::{DeltaError, DeltaResult};

/// Apply a delta produced by [`create_delta`](crate::create_delta) to a base
/// tree, mutating it into the target tree.
///
/// A delta applied against a base whose shape does not match fails with
/// [`DeltaError::InvalidDeltaShape`] and never half-applies silently; the
/// base may be partially modified when an error is returned, so callers that
/// need transactional behavior should apply against a copy.
pub fn apply_delta(base: &mut Value, delta: &Value) -> DeltaResult<()> {
    tracing::trace!(base = %base.kind(), delta = %delta.kind(), "applying delta");
    apply_node(base, delta, &Breadcrumb::root())
}

fn shape_err(path: &Breadcrumb<'_>, detail: impl Into<String>) -> DeltaError {
    DeltaError::InvalidDeltaShape {
        path: path.render(),
        detail: detail.into(),
    }
}

fn apply_node(base: &mut Value, delta: &Value, path: &Breadcrumb<'_>) -> DeltaResult<()> {
    match delta {
        Value::Noop => Ok(()),
        Value::Delete => Err(shape_err(path, "delete marker outside a delta map")),
        Value::IndexRange { .. } => {
            Err(shape_err(path, "index range outside a delta sequence"))
        }
        Value::DeltaMap { entries, .. } => {
            let Value::Map(base_entries) = base else {
                return Err(shape_err(
                    path,
                    format!("delta-map applied to {} base", base.kind()),
                ));
            };
            for (key, entry) in entries {
                let child = path.child_key(key);
                match entry {
                    Value::Noop => {}
                    Value::Delete => {
                        // Removal order across keys is not significant.
                        base_entries.remove(key);
                    }
                    _ => {
                        if let Some(slot) = base_entries.get_mut(key) {
                            apply_node(slot, entry, &child)?;
                        } else if entry.is_delta() {
                            return Err(shape_err(
                                &child,
                                format!("{} entry for a key missing from the base map", entry.kind()),
                            ));
                        } else {
                            base_entries.insert(key.clone(), entry.clone());
                        }
                    }
                }
            }
            Ok(())
        }
        Value::DeltaSequence { items, .. } => {
            let Value::Sequence(base_items) = base else {
                return Err(shape_err(
                    path,
                    format!("delta-sequence applied to {} base", base.kind()),
                ));
            };
            // Index ranges and anchors point into the original base, so the
            // new sequence is built on the side and swapped in at the end.
            let mut next = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let child = path.child_index(index);
                match item {
                    Value::IndexRange { start, len } => {
                        let start = *start as usize;
                        let end = start.checked_add(*len as usize).filter(|&e| e <= base_items.len());
                        let Some(end) = end else {
                            return Err(shape_err(
                                &child,
                                format!(
                                    "index range {}+{} exceeds base length {}",
                                    start,
                                    len,
                                    base_items.len()
                                ),
                            ));
                        };
                        next.extend_from_slice(&base_items[start..end]);
                    }
                    Value::DeltaMap { anchor, .. } | Value::DeltaSequence { anchor, .. } => {
                        let base_index = usize::try_from(*anchor)
                            .ok()
                            .filter(|&i| i < base_items.len());
                        let Some(base_index) = base_index else {
                            return Err(shape_err(
                                &child,
                                format!(
                                    "anchor {} outside base length {}",
                                    anchor,
                                    base_items.len()
                                ),
                            ));
                        };
                        let mut element = base_items[base_index].clone();
                        apply_node(&mut element, item, &child)?;
                        next.push(element);
                    }
                    Value::Noop | Value::Delete => {
                        return Err(shape_err(
                            &child,
                            format!("{} is not a valid sequence delta element", item.kind()),
                        ));
                    }
                    literal => next.push(literal.clone()),
                }
            }
            *base_items = next;
            Ok(())
        }
        // A plain value is a full replacement.
        replacement => {
            *base = replacement.clone();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_value::Kind;
    use std::collections::BTreeMap;

    fn map_of(pairs: &[(&str, Value)]) -> Value {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn seq_of(items: &[Value]) -> Value {
        Value::Sequence(items.to_vec())
    }

    fn delta_map(pairs: &[(&str, Value)]) -> Value {
        Value::DeltaMap {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
            anchor: -1,
        }
    }

    #[test]
    fn noop_leaves_base_untouched() {
        let mut base = map_of(&[("hp", Value::Int(10))]);
        let snapshot = base.clone();
        apply_delta(&mut base, &Value::Noop).unwrap();
        assert_eq!(base, snapshot);
    }

    #[test]
    fn plain_value_replaces_base() {
        let mut base = Value::Int(1);
        apply_delta(&mut base, &Value::from("replaced")).unwrap();
        assert_eq!(base, Value::from("replaced"));
        // Including across container variants.
        let mut base = map_of(&[("a", Value::Int(1))]);
        apply_delta(&mut base, &Value::Int(5)).unwrap();
        assert_eq!(base, Value::Int(5));
    }

    #[test]
    fn delta_map_deletes_updates_and_inserts() {
        let mut base = map_of(&[("x", Value::Int(1)), ("y", Value::Int(2))]);
        let delta = delta_map(&[
            ("y", Value::Delete),
            ("x", Value::Int(10)),
            ("z", Value::from("new")),
        ]);
        apply_delta(&mut base, &delta).unwrap();
        assert_eq!(
            base,
            map_of(&[("x", Value::Int(10)), ("z", Value::from("new"))])
        );
    }

    #[test]
    fn delete_of_missing_key_is_harmless() {
        let mut base = map_of(&[("x", Value::Int(1))]);
        apply_delta(&mut base, &delta_map(&[("ghost", Value::Delete)])).unwrap();
        assert_eq!(base, map_of(&[("x", Value::Int(1))]));
    }

    #[test]
    fn nested_map_delta_recurses() {
        let mut base = map_of(&[("player", map_of(&[("hp", Value::Int(100))]))]);
        let delta = delta_map(&[("player", delta_map(&[("hp", Value::Int(42))]))]);
        apply_delta(&mut base, &delta).unwrap();
        assert_eq!(base.get("player").get("hp").as_int().unwrap(), 42);
    }

    #[test]
    fn delta_sequence_copies_ranges_and_inserts() {
        let mut base = seq_of(&[
            Value::from("a"),
            Value::from("b"),
            Value::from("c"),
            Value::from("d"),
        ]);
        let delta = Value::DeltaSequence {
            items: vec![
                Value::IndexRange { start: 0, len: 2 },
                Value::from("x"),
                Value::IndexRange { start: 3, len: 1 },
            ],
            anchor: -1,
        };
        apply_delta(&mut base, &delta).unwrap();
        assert_eq!(
            base,
            seq_of(&[
                Value::from("a"),
                Value::from("b"),
                Value::from("x"),
                Value::from("d"),
            ])
        );
    }

    #[test]
    fn anchored_nested_delta_edits_the_referenced_element() {
        let mut base = seq_of(&[
            map_of(&[("id", Value::Int(1)), ("hp", Value::Int(9))]),
            map_of(&[("id", Value::Int(2)), ("hp", Value::Int(5))]),
        ]);
        // Target element 0 is base element 1 with hp changed.
        let nested = Value::DeltaMap {
            entries: [("hp".to_string(), Value::Int(50))].into_iter().collect(),
            anchor: 1,
        };
        let delta = Value::DeltaSequence {
            items: vec![nested, Value::IndexRange { start: 0, len: 1 }],
            anchor: -1,
        };
        apply_delta(&mut base, &delta).unwrap();
        assert_eq!(base.at(0).unwrap().get("id").as_int().unwrap(), 2);
        assert_eq!(base.at(0).unwrap().get("hp").as_int().unwrap(), 50);
        assert_eq!(base.at(1).unwrap().get("id").as_int().unwrap(), 1);
    }

    #[test]
    fn ranges_reference_the_original_base() {
        // A delta that reverses [a, b] using two ranges; if application
        // mutated in place the second range would read the wrong element.
        let mut base = seq_of(&[Value::from("a"), Value::from("b")]);
        let delta = Value::DeltaSequence {
            items: vec![
                Value::IndexRange { start: 1, len: 1 },
                Value::IndexRange { start: 0, len: 1 },
            ],
            anchor: -1,
        };
        apply_delta(&mut base, &delta).unwrap();
        assert_eq!(base, seq_of(&[Value::from("b"), Value::from("a")]));
    }

    #[test]
    fn delete_outside_a_map_is_invalid() {
        let mut base = Value::Int(1);
        let err = apply_delta(&mut base, &Value::Delete).unwrap_err();
        assert!(matches!(err, DeltaError::InvalidDeltaShape { .. }));
    }

    #[test]
    fn index_range_outside_a_sequence_is_invalid() {
        let mut base = Value::Int(1);
        let err =
            apply_delta(&mut base, &Value::IndexRange { start: 0, len: 1 }).unwrap_err();
        assert!(matches!(err, DeltaError::InvalidDeltaShape { .. }));
    }

    #[test]
    fn delta_map_on_wrong_base_variant_is_invalid() {
        let mut base = seq_of(&[Value::Int(1)]);
        let err = apply_delta(&mut base, &delta_map(&[("x", Value::Int(1))])).unwrap_err();
        let DeltaError::InvalidDeltaShape { path, detail } = err else {
            panic!("expected invalid shape");
        };
        assert_eq!(path, "$");
        assert!(detail.contains("sequence"), "detail was: {detail}");
    }

    #[test]
    fn out_of_bounds_range_is_invalid_with_path() {
        let mut base = seq_of(&[Value::Int(1)]);
        let delta = Value::DeltaSequence {
            items: vec![Value::IndexRange { start: 0, len: 5 }],
            anchor: -1,
        };
        let err = apply_delta(&mut base, &delta).unwrap_err();
        let DeltaError::InvalidDeltaShape { path, .. } = err else {
            panic!("expected invalid shape");
        };
        assert_eq!(path, "$[0]");
    }

    #[test]
    fn out_of_bounds_anchor_is_invalid() {
        let mut base = seq_of(&[Value::map()]);
        let delta = Value::DeltaSequence {
            items: vec![Value::DeltaMap {
                entries: BTreeMap::new(),
                anchor: 7,
            }],
            anchor: -1,
        };
        assert!(matches!(
            apply_delta(&mut base, &delta).unwrap_err(),
            DeltaError::InvalidDeltaShape { .. }
        ));
    }

    #[test]
    fn nested_delta_for_missing_key_is_invalid() {
        let mut base = Value::map();
        let delta = delta_map(&[("ghost", delta_map(&[("hp", Value::Int(1))]))]);
        let err = apply_delta(&mut base, &delta).unwrap_err();
        let DeltaError::InvalidDeltaShape { path, detail } = err else {
            panic!("expected invalid shape");
        };
        assert_eq!(path, "$.ghost");
        assert_eq!(detail, format!("{} entry for a key missing from the base map", Kind::DeltaMap));
    }
}
