//! Explicit field selection for JSON responses.
//!
//! Restaurant, RestaurantPizza and Pizza form a relationship cycle, so
//! nothing here ever expands a relationship on its own: `columns` emits
//! scalar fields only, and callers opt in to nesting via `include`.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// All scalar columns of an entity as a JSON object.
pub fn columns<T: Serialize>(model: &T) -> Map<String, Value> {
    match serde_json::to_value(model) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Keep exactly the listed keys. A key the entity does not have is an
/// error rather than being silently dropped.
pub fn project(map: &Map<String, Value>, only: &[&str]) -> Result<Map<String, Value>, ModelError> {
    let mut out = Map::new();
    for key in only {
        match map.get(*key) {
            Some(value) => {
                out.insert((*key).to_string(), value.clone());
            }
            None => {
                return Err(ModelError::Validation(format!("unknown field: {}", key)));
            }
        }
    }
    Ok(out)
}

/// Merge a named relationship into a base map as a sequence of its
/// serialized rows.
pub fn include(base: &mut Map<String, Value>, name: &str, items: Vec<Map<String, Value>>) {
    let rows = items.into_iter().map(Value::Object).collect();
    base.insert(name.to_string(), Value::Array(rows));
}
