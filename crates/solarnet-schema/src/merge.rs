//! # Schema Layer Merging
//!
//! Recursive deep merge of schema documents. The three branches are
//! exhaustive over the JSON value model:
//!
//! - mapping vs mapping: recurse per key.
//! - sequence vs sequence: concatenate (no deduplication; callers must
//!   avoid re-listing identical conditional-requirement rules across
//!   layers).
//! - anything else: the layer's value overwrites the base's
//!   (last-applied-wins, including type-mismatch conflicts).
//!
//! The merge has no conflict-resolution strategy beyond last-write-wins,
//! so layers must be applied in priority order: defaults first, then
//! caller layers in the order given.

use serde_json::Value;

/// Merge `layer` into `base` in place.
pub fn merge_layer(base: &mut Value, layer: &Value) {
    match (&mut *base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, layer_value) in layer_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_layer(base_value, layer_value),
                    None => {
                        base_map.insert(key.clone(), layer_value.clone());
                    }
                }
            }
        }
        (Value::Array(base_seq), Value::Array(layer_seq)) => {
            base_seq.extend(layer_seq.iter().cloned());
        }
        (base_value, layer_value) => {
            if *base_value != *layer_value {
                *base_value = layer_value.clone();
            }
        }
    }
}
