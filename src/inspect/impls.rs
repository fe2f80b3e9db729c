//! `Inspect` implementations for std types.

use super::{Field, Inspect};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::{Arc, OnceLock};

/// Leaves have no fields and render through `Display`.
macro_rules! impl_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_leaf!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, &'static str,
);

impl Inspect for () {
    fn render(&self) -> String {
        "()".to_string()
    }
}

// ============================================================================
// Absence and indirection
// ============================================================================

impl<T: Inspect> Inspect for Option<T> {
    fn render(&self) -> String {
        self.as_ref().map_or_else(|| "None".to_string(), Inspect::render)
    }

    fn as_present(&self) -> Option<&dyn Inspect> {
        self.as_ref().and_then(Inspect::as_present)
    }
}

impl<T: Inspect> Inspect for OnceLock<T> {
    fn render(&self) -> String {
        self.get()
            .map_or_else(|| "<uninit>".to_string(), Inspect::render)
    }

    fn as_present(&self) -> Option<&dyn Inspect> {
        self.get().and_then(Inspect::as_present)
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr<T> {
                fn render(&self) -> String {
                    (**self).render()
                }

                fn as_present(&self) -> Option<&dyn Inspect> {
                    (**self).as_present()
                }
            }
        )*
    };
}

impl_pointer!(Box, Arc, Rc);

// ============================================================================
// Sequences
// ============================================================================

fn indexed_fields<T: Inspect>(items: &[T]) -> Vec<Field<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| Field::of(index.to_string(), item))
        .collect()
}

fn render_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a dyn Inspect>,
{
    let rendered: Vec<String> = items.into_iter().map(Inspect::render).collect();
    format!("[{}]", rendered.join(", "))
}

impl<T: Inspect> Inspect for Vec<T> {
    fn fields(&self) -> Vec<Field<'_>> {
        indexed_fields(self)
    }

    fn render(&self) -> String {
        render_list(self.iter().map(|v| v as &dyn Inspect))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn fields(&self) -> Vec<Field<'_>> {
        indexed_fields(self)
    }

    fn render(&self) -> String {
        render_list(self.iter().map(|v| v as &dyn Inspect))
    }
}

// ============================================================================
// Maps (fields are keyed by the rendered map key)
// ============================================================================

fn render_entries(entries: &[Field<'_>]) -> String {
    let rendered: Vec<String> = entries
        .iter()
        .map(|field| match &field.value {
            super::FieldValue::Present(value) => format!("{}: {}", field.name, value.render()),
            super::FieldValue::Unreadable(_) => format!("{}: <unreadable>", field.name),
        })
        .collect();
    format!("{{{}}}", rendered.join(", "))
}

impl<K, V> Inspect for BTreeMap<K, V>
where
    K: Display + Ord + 'static,
    V: Inspect,
{
    fn fields(&self) -> Vec<Field<'_>> {
        self.iter()
            .map(|(key, value)| Field::of(key.to_string(), value))
            .collect()
    }

    fn render(&self) -> String {
        render_entries(&self.fields())
    }
}

impl<K, V> Inspect for HashMap<K, V>
where
    K: Display + Eq + Hash + 'static,
    V: Inspect,
{
    /// Keys are sorted by their rendering so reports are deterministic.
    fn fields(&self) -> Vec<Field<'_>> {
        let mut fields: Vec<Field<'_>> = self
            .iter()
            .map(|(key, value)| Field::of(key.to_string(), value))
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    fn render(&self) -> String {
        render_entries(&self.fields())
    }
}
