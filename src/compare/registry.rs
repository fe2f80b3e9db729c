//! Comparator registry and ignore sets.
//!
//! Comparators are dispatched by **exact** runtime type. A comparator
//! registered for `String` is never consulted for a `Box<String>` field's
//! declared type, and there is no supertype or trait-based matching; wrapper
//! types are unwrapped by [`Inspect::as_present`](crate::Inspect::as_present)
//! before lookup instead.

use crate::error::ComparatorError;
use crate::inspect::{Identity, Inspect, TypeKey};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

type ComparatorFn = dyn Fn(&dyn Any, &dyn Any) -> Result<bool, ComparatorError> + Send + Sync;

/// A type-specific equality predicate.
#[derive(Clone)]
pub struct Comparator {
    type_key: TypeKey,
    func: Arc<ComparatorFn>,
}

impl Comparator {
    /// Wrap an infallible predicate over `T`.
    pub fn new<T, F>(func: F) -> Self
    where
        T: Any,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self::fallible::<T, _, std::convert::Infallible>(move |a, b| Ok(func(a, b)))
    }

    /// Wrap a predicate over `T` that may fail; a failure counts as a
    /// difference.
    pub fn fallible<T, F, E>(func: F) -> Self
    where
        T: Any,
        F: Fn(&T, &T) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let type_key = TypeKey::of::<T>();
        let func = move |a: &dyn Any, b: &dyn Any| -> Result<bool, ComparatorError> {
            let (Some(a), Some(b)) = (a.downcast_ref::<T>(), b.downcast_ref::<T>()) else {
                return Err(ComparatorError::Downcast {
                    expected: type_key.name(),
                });
            };
            func(a, b).map_err(|e| ComparatorError::Failed {
                type_name: type_key.name(),
                message: e.to_string(),
            })
        };
        Self {
            type_key,
            func: Arc::new(func),
        }
    }

    /// Untyped comparator for `type_key`; the function receives the raw
    /// values and must do its own downcasting.
    pub fn from_dyn<F>(type_key: TypeKey, func: F) -> Self
    where
        F: Fn(&dyn Any, &dyn Any) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        Self {
            type_key,
            func: Arc::new(func),
        }
    }

    /// The type this comparator was registered for.
    #[must_use]
    pub const fn type_key(&self) -> TypeKey {
        self.type_key
    }

    /// Compare two values.
    pub fn call(&self, a: &dyn Any, b: &dyn Any) -> Result<bool, ComparatorError> {
        (self.func)(a, b)
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("type", &self.type_key.name())
            .finish_non_exhaustive()
    }
}

/// Maps runtime types to comparators and tracks what must be skipped.
///
/// Mutation happens through `&mut self` during setup; a shared registry is
/// only ever read, so concurrent comparisons need no locking.
#[derive(Debug, Clone, Default)]
pub struct ComparatorRegistry {
    comparators: HashMap<TypeKey, Comparator>,
    ignored_types: HashSet<TypeKey>,
    ignored_instances: HashSet<Identity>,
}

impl ComparatorRegistry {
    /// An empty registry: every field is compared structurally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the `PartialEq` leaf comparators pre-installed.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::builtins::install(&mut registry);
        registry
    }

    /// Install or replace the comparator for `T`. Last write wins.
    pub fn register<T, F>(&mut self, func: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.insert(Comparator::new(func))
    }

    /// Install or replace a fallible comparator for `T`.
    pub fn register_fallible<T, F, E>(&mut self, func: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &T) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.insert(Comparator::fallible(func))
    }

    /// Untyped form of [`register`](Self::register): `func` receives the raw
    /// values of type `type_key` and does its own downcasting.
    pub fn register_dyn<F>(&mut self, type_key: TypeKey, func: F) -> &mut Self
    where
        F: Fn(&dyn Any, &dyn Any) -> Result<bool, ComparatorError> + Send + Sync + 'static,
    {
        self.insert(Comparator::from_dyn(type_key, func))
    }

    /// Install or replace a prepared comparator under its own type key.
    pub fn insert(&mut self, comparator: Comparator) -> &mut Self {
        if self
            .comparators
            .insert(comparator.type_key(), comparator.clone())
            .is_some()
        {
            tracing::debug!("Replaced comparator for {}", comparator.type_key());
        }
        self
    }

    /// Remove the comparator for a type, if any.
    pub fn unregister(&mut self, type_key: TypeKey) -> Option<Comparator> {
        self.comparators.remove(&type_key)
    }

    /// Comparator registered for exactly this type.
    #[must_use]
    pub fn lookup(&self, type_key: TypeKey) -> Option<&Comparator> {
        self.comparators.get(&type_key)
    }

    /// Skip every field of type `T`.
    pub fn ignore<T: Any>(&mut self) -> &mut Self {
        self.ignore_type(TypeKey::of::<T>())
    }

    pub fn ignore_type(&mut self, type_key: TypeKey) -> &mut Self {
        self.ignored_types.insert(type_key);
        self
    }

    /// Skip this particular instance wherever it appears as a field value.
    ///
    /// Tracking is by identity: a value-equal but distinct instance is not
    /// ignored. The instance must outlive the comparisons relying on it.
    pub fn ignore_instance(&mut self, value: &dyn Inspect) -> &mut Self {
        let target = value.as_present().unwrap_or(value);
        self.ignored_instances.insert(Identity::of(target));
        self
    }

    #[must_use]
    pub fn is_ignored(&self, type_key: TypeKey) -> bool {
        self.ignored_types.contains(&type_key)
    }

    #[must_use]
    pub fn is_ignored_instance(&self, identity: Identity) -> bool {
        self.ignored_instances.contains(&identity)
    }

    /// Number of registered comparators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comparators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }
}
