//! Path evaluation over a settings document
//!
//! The document is a `serde_json` mapping; values are tagged by
//! [`serde_json::Value`] (null, bool, number, string, array, object).
//! Reading walks the document one [`Segment`] at a time and stops at the
//! first missing or wrongly shaped step. Writing creates whatever
//! intermediate mappings and sequences the path needs.

use crate::path::{KeyPath, Segment};
use serde_json::{Map, Value};

/// The root persisted value of a settings store
pub type Document = Map<String, Value>;

/// Follow one segment from a mapping
fn step<'a>(map: &'a Document, segment: &Segment) -> Option<&'a Value> {
    let value = map.get(segment.key())?;
    match segment {
        Segment::Key(_) => Some(value),
        Segment::Index { index, .. } => value.as_array()?.get(*index),
    }
}

fn step_mut<'a>(map: &'a mut Document, segment: &Segment) -> Option<&'a mut Value> {
    let value = map.get_mut(segment.key())?;
    match segment {
        Segment::Key(_) => Some(value),
        Segment::Index { index, .. } => value.as_array_mut()?.get_mut(*index),
    }
}

/// Resolve `path` to the value it addresses.
///
/// Returns `None` for the root path (the caller owns the whole document) and
/// whenever a step reads a missing key, reads past the end of a sequence,
/// indexes into a non-sequence or keys into a non-mapping.
pub(crate) fn lookup<'a>(doc: &'a Document, path: &KeyPath) -> Option<&'a Value> {
    let (first, rest) = path.segments().split_first()?;
    let mut current = step(doc, first)?;
    for segment in rest {
        current = step(current.as_object()?, segment)?;
    }
    Some(current)
}

/// Whether `path` addresses an existing location. The root path names no
/// location and is never contained.
pub(crate) fn contains(doc: &Document, path: &KeyPath) -> bool {
    !path.is_root() && lookup(doc, path).is_some()
}

fn ensure_mapping(slot: &mut Value) -> &mut Document {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot holds a mapping"),
    }
}

/// Make `slot` a sequence with at least `index + 1` elements, padding with holes
fn ensure_sequence(slot: &mut Value, index: usize) -> &mut Vec<Value> {
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(seq) => {
            if seq.len() <= index {
                seq.resize(index + 1, Value::Null);
            }
            seq
        }
        _ => unreachable!("slot holds a sequence"),
    }
}

/// Descend through an intermediate segment, creating a mapping at its target
fn descend_or_create<'a>(map: &'a mut Document, segment: &Segment) -> &'a mut Document {
    let slot = map.entry(segment.key()).or_insert(Value::Null);
    match segment {
        Segment::Key(_) => ensure_mapping(slot),
        Segment::Index { index, .. } => {
            let seq = ensure_sequence(slot, *index);
            ensure_mapping(&mut seq[*index])
        }
    }
}

/// Assign `value` at `path`, creating intermediate containers as needed.
///
/// Intermediate values of the wrong shape are replaced. Assigning to the
/// root path replaces the document when `value` is a mapping and is ignored
/// otherwise; callers reject that case before getting here.
pub(crate) fn assign(doc: &mut Document, path: &KeyPath, value: Value) {
    let Some((leaf, parents)) = path.split_last() else {
        if let Value::Object(map) = value {
            *doc = map;
        }
        return;
    };

    let mut current = doc;
    for segment in parents {
        current = descend_or_create(current, segment);
    }

    match leaf {
        Segment::Key(key) => {
            current.insert(key.clone(), value);
        }
        Segment::Index { key, index } => {
            let slot = current.entry(key.as_str()).or_insert(Value::Null);
            let seq = ensure_sequence(slot, *index);
            seq[*index] = value;
        }
    }
}

/// Remove the leaf addressed by `path`.
///
/// A plain leaf is deleted from its mapping. An indexed leaf is replaced by a
/// null hole so the indices of later elements stay put. The root path empties
/// the document. Returns whether anything changed; an unresolvable path
/// leaves the document untouched.
pub(crate) fn remove(doc: &mut Document, path: &KeyPath) -> bool {
    let Some((leaf, parents)) = path.split_last() else {
        let changed = !doc.is_empty();
        doc.clear();
        return changed;
    };

    let mut current = doc;
    for segment in parents {
        current = match step_mut(current, segment).and_then(Value::as_object_mut) {
            Some(map) => map,
            None => return false,
        };
    }

    match leaf {
        Segment::Key(key) => current.remove(key).is_some(),
        Segment::Index { key, index } => {
            match current
                .get_mut(key)
                .and_then(Value::as_array_mut)
                .and_then(|seq| seq.get_mut(*index))
            {
                Some(slot) => {
                    *slot = Value::Null;
                    true
                }
                None => false,
            }
        }
    }
}
