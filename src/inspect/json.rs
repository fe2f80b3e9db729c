//! `Inspect` for `serde_json` documents.
//!
//! A `Value` normalizes to its payload: `null` is absent, scalars become the
//! leaf `bool`/`Number`/`String`, arrays a `Vec<Value>` and objects a
//! `Map<String, Value>`. Differing JSON kinds therefore surface as type
//! mismatches, and object keys act as field names.

use super::{Field, Inspect};
use serde_json::{Map, Number, Value};

impl Inspect for Value {
    fn render(&self) -> String {
        self.to_string()
    }

    fn as_present(&self) -> Option<&dyn Inspect> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b),
            Self::Number(n) => Some(n),
            Self::String(s) => Some(s),
            Self::Array(items) => Some(items),
            Self::Object(map) => Some(map),
        }
    }
}

impl Inspect for Number {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Inspect for Map<String, Value> {
    fn fields(&self) -> Vec<Field<'_>> {
        self.iter()
            .map(|(key, value)| Field::of(key.clone(), value))
            .collect()
    }

    fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{...}".to_string())
    }
}
