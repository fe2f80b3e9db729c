//! The structural walker.

use super::fingerprint::Fingerprints;
use super::{CacheStats, ComparatorRegistry, Fingerprint, MemoCache};
use crate::config::{CompareConfig, CyclePolicy};
use crate::error::{ComparatorError, FieldAccessError};
use crate::inspect::{Field, FieldValue, Identity, Inspect, TypeKey};
use crate::report::{FieldDiffs, Report, Side};
use indexmap::{IndexMap, IndexSet};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Recursive structural comparison engine.
///
/// `compare` takes `&self` and may be called from many threads at once.
/// Registration (`register`, `ignore`, ...) needs `&mut self` and belongs
/// to a setup phase before the engine is shared. Every registration change
/// empties the memo cache.
#[derive(Debug)]
pub struct CompareEngine {
    registry: ComparatorRegistry,
    cache: MemoCache,
    config: CompareConfig,
}

/// Label used when logging a comparator applied to the compared values
/// themselves rather than to one of their fields.
const ROOT: &str = "<root>";

/// Per-call walk state: the pairs currently being compared, innermost last,
/// and the content fingerprints computed so far.
#[derive(Default)]
struct Walk {
    stack: IndexSet<(Identity, Identity)>,
    fingerprints: Fingerprints,
}

/// Result of one recursive step.
///
/// `low` is the shallowest stack depth this result assumed equal because of
/// a cycle; `usize::MAX` when it depends on no unresolved assumption.
struct Outcome {
    report: Report,
    low: usize,
}

impl Outcome {
    const fn settled(report: Report) -> Self {
        Self {
            report,
            low: usize::MAX,
        }
    }
}

/// Discrepancies found at one level of recursion.
#[derive(Default)]
struct Level {
    nested: Vec<Report>,
    diffs: FieldDiffs,
    low: usize,
}

impl CompareEngine {
    /// Create a new engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CompareConfig::default())
    }

    /// Create an engine from a configuration.
    #[must_use]
    pub fn with_config(config: CompareConfig) -> Self {
        let registry = if config.builtin_comparators {
            ComparatorRegistry::with_builtins()
        } else {
            ComparatorRegistry::new()
        };
        Self::with_registry(registry, config)
    }

    /// Create an engine around a prepared registry.
    #[must_use]
    pub fn with_registry(registry: ComparatorRegistry, config: CompareConfig) -> Self {
        Self {
            registry,
            cache: MemoCache::new(),
            config,
        }
    }

    /// Install or replace the comparator for `T`.
    pub fn register<T, F>(&mut self, func: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.registry.register(func);
        self.cache.clear();
        self
    }

    /// Install or replace a fallible comparator for `T`.
    pub fn register_fallible<T, F, E>(&mut self, func: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T, &T) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        self.registry.register_fallible(func);
        self.cache.clear();
        self
    }

    /// Never descend into fields of type `T`.
    pub fn ignore<T: Any>(&mut self) -> &mut Self {
        self.registry.ignore::<T>();
        self.cache.clear();
        self
    }

    /// Never descend into this particular instance.
    pub fn ignore_instance(&mut self, value: &dyn Inspect) -> &mut Self {
        self.registry.ignore_instance(value);
        self.cache.clear();
        self
    }

    pub const fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    /// Mutable access to the registry. Empties the memo cache, since
    /// anything stored may no longer match the new registry.
    pub fn registry_mut(&mut self) -> &mut ComparatorRegistry {
        self.cache.clear();
        &mut self.registry
    }

    pub const fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of memoized reports.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop all memoized reports.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Compare two values of the same declared type.
    pub fn compare<T: Inspect>(&self, a: &T, b: &T) -> Report {
        self.compare_dyn(Some(a as &dyn Inspect), Some(b as &dyn Inspect))
    }

    /// Compare two possibly absent values.
    pub fn compare_opt<T: Inspect>(&self, a: Option<&T>, b: Option<&T>) -> Report {
        self.compare_dyn(a.map(|v| v as &dyn Inspect), b.map(|v| v as &dyn Inspect))
    }

    /// Compare two possibly absent trait objects.
    pub fn compare_dyn(&self, a: Option<&dyn Inspect>, b: Option<&dyn Inspect>) -> Report {
        let mut walk = Walk::default();
        let a = a.and_then(Inspect::as_present);
        let b = b.and_then(Inspect::as_present);
        self.walk(a, b, &mut walk).report
    }

    // ------------------------------------------------------------------------
    // Walk
    // ------------------------------------------------------------------------

    /// Compare two normalized values.
    fn walk(&self, a: Option<&dyn Inspect>, b: Option<&dyn Inspect>, walk: &mut Walk) -> Outcome {
        let (a, b) = match (a, b) {
            (Some(a), Some(b)) => (a, b),
            (None, None) => return Outcome::settled(Report::Equal),
            (None, Some(_)) => {
                return Outcome::settled(Report::NullMismatch {
                    position: Side::Left,
                })
            }
            (Some(_), None) => {
                return Outcome::settled(Report::NullMismatch {
                    position: Side::Right,
                })
            }
        };

        let (left, right) = (Identity::of(a), Identity::of(b));
        if left == right {
            return Outcome::settled(Report::Equal);
        }

        let (type_a, type_b) = (a.type_key(), b.type_key());
        if type_a != type_b {
            return Outcome::settled(Report::TypeMismatch {
                left: type_a.name().to_string(),
                right: type_b.name().to_string(),
            });
        }

        // Fields are handed to their comparator before recursion, so this
        // only decides the two values passed to `compare` itself.
        if let Some(comparator) = self.registry.lookup(type_a) {
            let report = if invoke(comparator, ROOT, a, b) {
                Report::Equal
            } else {
                Report::ValueMismatch {
                    left: a.render(),
                    right: b.render(),
                }
            };
            return Outcome::settled(report);
        }

        if let Some(depth) = walk.stack.get_index_of(&(left, right)) {
            tracing::debug!("Cycle on {} at depth {}", type_a, depth);
            let report = match self.config.cycle_policy {
                CyclePolicy::AssumeEqual => Report::Equal,
                CyclePolicy::Report => Report::CycleDetected,
            };
            return Outcome { report, low: depth };
        }

        let fingerprint = self.config.memoize.then(|| Fingerprint {
            left: walk.fingerprints.of(a),
            right: walk.fingerprints.of(b),
        });
        if let Some(fingerprint) = fingerprint {
            if let Some(cached) = self.cache.get(left, right, fingerprint) {
                tracing::trace!("Cache hit for {}", type_a);
                return Outcome::settled((*cached).clone());
            }
        }

        let depth = walk.stack.len();
        walk.stack.insert((left, right));
        let level = self.compare_fields(a, b, walk);
        walk.stack.pop();

        let report = Report::assemble(level.nested, level.diffs);
        if level.low < depth {
            // Still relies on an ancestor being equal; not final yet.
            return Outcome {
                report,
                low: level.low,
            };
        }

        if let Some(fingerprint) = fingerprint {
            self.cache.put(left, right, fingerprint, report.clone());
        }
        Outcome::settled(report)
    }

    /// Pair up the fields of `a` and `b` by name and compare each pair.
    ///
    /// Fields are visited in `b`'s declaration order, then any field only
    /// `a` has (dynamically sized values such as vectors and maps).
    fn compare_fields(&self, a: &dyn Inspect, b: &dyn Inspect, walk: &mut Walk) -> Level {
        let mut level = Level {
            low: usize::MAX,
            ..Level::default()
        };

        let mut a_fields: IndexMap<Cow<'static, str>, Field<'_>> = a
            .fields()
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect();

        for b_field in b.fields() {
            let a_field = a_fields.shift_remove(&b_field.name);
            self.compare_field(
                &b_field.name,
                b_field.declared,
                a_field.as_ref().map(|f| &f.value),
                Some(&b_field.value),
                walk,
                &mut level,
            );
        }

        for (name, a_field) in &a_fields {
            self.compare_field(
                name,
                a_field.declared,
                Some(&a_field.value),
                None,
                walk,
                &mut level,
            );
        }

        level
    }

    fn compare_field(
        &self,
        name: &str,
        declared: TypeKey,
        a: Option<&FieldValue<'_>>,
        b: Option<&FieldValue<'_>>,
        walk: &mut Walk,
        level: &mut Level,
    ) {
        let (a, b) = match (read_field(a), read_field(b)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(err), _) | (_, Err(err)) => {
                tracing::warn!("Skipping field '{}': {}", name, err);
                return;
            }
        };

        if self.is_skipped(declared, a, b) {
            tracing::trace!("Ignoring field '{}'", name);
            return;
        }

        if let (Some(av), Some(bv)) = (a, b) {
            let value_type = bv.type_key();
            if av.type_key() == value_type {
                if let Some(comparator) = self.registry.lookup(value_type) {
                    if !invoke(comparator, name, av, bv) {
                        level.diffs.insert(format!("{name}:0"), av.render());
                        level.diffs.insert(format!("{name}:1"), bv.render());
                    }
                    return;
                }
            }
        }

        let outcome = self.walk(a, b, walk);
        level.low = level.low.min(outcome.low);
        if !outcome.report.is_equal() {
            level.nested.push(Report::nested(name, outcome.report));
        }
    }

    fn is_skipped(
        &self,
        declared: TypeKey,
        a: Option<&dyn Inspect>,
        b: Option<&dyn Inspect>,
    ) -> bool {
        if self.registry.is_ignored(declared) {
            return true;
        }
        [a, b].into_iter().flatten().any(|value| {
            self.registry.is_ignored(value.type_key())
                || self.registry.is_ignored_instance(Identity::of(value))
        })
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one side of a field pair. A side the value does not have at all
/// counts as absent.
fn read_field<'a>(
    value: Option<&FieldValue<'a>>,
) -> Result<Option<&'a dyn Inspect>, FieldAccessError> {
    match value {
        None => Ok(None),
        Some(FieldValue::Present(value)) => Ok(value.as_present()),
        Some(FieldValue::Unreadable(err)) => Err(err.clone()),
    }
}

/// Run a comparator, treating errors and panics as "not equal".
fn invoke(
    comparator: &super::Comparator,
    field: &str,
    a: &dyn Inspect,
    b: &dyn Inspect,
) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| comparator.call(a.as_any(), b.as_any()))) {
        Ok(Ok(equal)) => equal,
        Ok(Err(err)) => {
            tracing::warn!("Comparator failed on field '{}': {}", field, err);
            false
        }
        Err(payload) => {
            let err = ComparatorError::Panicked {
                type_name: comparator.type_key().name(),
                message: panic_message(payload.as_ref()).to_string(),
            };
            tracing::warn!("Field '{}': {}", field, err);
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
