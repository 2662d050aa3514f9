use crate::value::{Mapping, Value};

/// Shallow-merge `overlay` on top of `base`.
///
/// Top-level entries of `overlay` replace entries of `base` with the same key
/// wholesale; nested mappings are not merged.
pub fn shallow_merge(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Merge one parsed document on top of the documents merged so far.
///
/// An empty document (`null`) changes nothing. A document that is not a
/// mapping replaces everything, so validation can report the bad root.
pub fn merge_document(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            Value::Mapping(shallow_merge(base, overlay))
        }
        (_, overlay) => overlay,
    }
}
