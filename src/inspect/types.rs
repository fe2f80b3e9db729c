//! Core introspection types.

use crate::error::FieldAccessError;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// Type and identity keys
// ============================================================================

/// Stable identifier of a runtime type.
///
/// Equality and hashing use only the [`TypeId`]; the name is carried for
/// logging and reports.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of a concrete type.
    #[must_use]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Reference identity of a value: its address plus its runtime type.
///
/// The type is part of the key because a struct and its first field share
/// an address. Identities are only meaningful while the value is alive and
/// has not moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_key: TypeKey,
}

impl Identity {
    /// Identity of an inspectable value.
    #[must_use]
    pub fn of(value: &dyn Inspect) -> Self {
        Self {
            addr: (value as *const dyn Inspect).cast::<()>() as usize,
            type_key: value.type_key(),
        }
    }

    #[must_use]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }
}

// ============================================================================
// Inspect trait
// ============================================================================

/// Access to the concrete type behind a trait object.
///
/// Blanket-implemented for every sized `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn type_key(&self) -> TypeKey;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

/// Upcast to `&dyn Inspect`, blanket-implemented for every inspectable type.
pub trait AsInspect {
    fn as_inspect(&self) -> &dyn Inspect;
}

impl<T: Inspect> AsInspect for T {
    fn as_inspect(&self) -> &dyn Inspect {
        self
    }
}

/// A value the structural walker can take apart.
pub trait Inspect: AsAny + AsInspect {
    /// Fields declared directly on this value, in declaration order.
    ///
    /// Leaves return no fields.
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    /// Canonical text representation used in field diffs.
    fn render(&self) -> String;

    /// The value the walker should actually compare.
    ///
    /// `None` means "no value". Wrappers (`Option`, `Box`, `Arc`, ...)
    /// forward to their content so that identity and runtime type refer to
    /// the pointee.
    fn as_present(&self) -> Option<&dyn Inspect> {
        Some(self.as_inspect())
    }
}

// ============================================================================
// Fields
// ============================================================================

/// The content of a field as seen by the walker.
#[derive(Clone)]
pub enum FieldValue<'a> {
    /// A readable value (which may still normalize to absence)
    Present(&'a dyn Inspect),
    /// The field exists but its value could not be read
    Unreadable(FieldAccessError),
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => f.debug_tuple("Present").field(&value.render()).finish(),
            Self::Unreadable(err) => f.debug_tuple("Unreadable").field(err).finish(),
        }
    }
}

/// A named field of an inspected value.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    /// Field name, unique within its parent
    pub name: Cow<'static, str>,
    /// Declared type of the field (e.g. `Option<String>`, not `String`)
    pub declared: TypeKey,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    /// A readable field.
    pub fn of<T: Inspect>(name: impl Into<Cow<'static, str>>, value: &'a T) -> Self {
        Self {
            name: name.into(),
            declared: TypeKey::of::<T>(),
            value: FieldValue::Present(value),
        }
    }

    /// A readable field whose declared type is only known dynamically.
    pub fn of_dyn(name: impl Into<Cow<'static, str>>, value: &'a dyn Inspect) -> Self {
        Self {
            name: name.into(),
            declared: value.type_key(),
            value: FieldValue::Present(value),
        }
    }

    /// A field that exists but could not be read.
    pub fn unreadable(
        name: impl Into<Cow<'static, str>>,
        declared: TypeKey,
        reason: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let error = FieldAccessError::new(name.as_ref(), reason);
        Self {
            name,
            declared,
            value: FieldValue::Unreadable(error),
        }
    }
}
