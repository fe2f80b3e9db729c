//! Content fingerprints for memoized reports.
//!
//! The memo cache is keyed by address, and an address is free for reuse as
//! soon as the value behind it is dropped or mutated. Each cache entry
//! therefore also records a fingerprint of both operands' content, and a
//! lookup whose fingerprints disagree is treated as a miss.
//!
//! A fingerprint covers everything a report can depend on: runtime types,
//! field names, declared field types, absence, and the rendered text of
//! leaves. Leaves whose `render` hides part of their state can collide.

use crate::inspect::{FieldValue, Identity, Inspect};
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;
const UNREADABLE: u8 = 2;
const BACK_REFERENCE: u8 = 3;

/// Fingerprints computed during one comparison.
///
/// The compared values are borrowed for the whole comparison, so an identity
/// seen twice within it is the same value.
#[derive(Debug, Default)]
pub(crate) struct Fingerprints {
    known: HashMap<Identity, u64>,
}

impl Fingerprints {
    /// Content hash of everything reachable from `value`.
    pub(crate) fn of(&mut self, value: &dyn Inspect) -> u64 {
        match value.as_present() {
            Some(present) => self.visit(present, &mut Vec::new()).0,
            None => xxh3_64(&[ABSENT]),
        }
    }

    /// Returns the hash and the shallowest `path` index it referred back to.
    ///
    /// A hash that refers back above its own position describes the value
    /// only relative to that ancestor and is not remembered.
    fn visit(&mut self, value: &dyn Inspect, path: &mut Vec<Identity>) -> (u64, usize) {
        let identity = Identity::of(value);
        if let Some(&hash) = self.known.get(&identity) {
            return (hash, usize::MAX);
        }
        if let Some(index) = path.iter().position(|seen| *seen == identity) {
            let mut input = vec![BACK_REFERENCE];
            input.extend((path.len() - index).to_le_bytes());
            return (xxh3_64(&input), index);
        }

        let depth = path.len();
        path.push(identity);

        let mut input = Vec::new();
        input.extend(value.type_key().name().as_bytes());
        let fields = value.fields();
        if fields.is_empty() {
            input.push(0);
            input.extend(value.render().as_bytes());
        }

        let mut low = usize::MAX;
        for field in &fields {
            input.push(0);
            input.extend(field.name.as_bytes());
            input.push(0);
            input.extend(field.declared.name().as_bytes());
            match &field.value {
                FieldValue::Present(inner) => match inner.as_present() {
                    Some(inner) => {
                        let (hash, inner_low) = self.visit(inner, path);
                        low = low.min(inner_low);
                        input.push(PRESENT);
                        input.extend(hash.to_le_bytes());
                    }
                    None => input.push(ABSENT),
                },
                FieldValue::Unreadable(err) => {
                    input.push(UNREADABLE);
                    input.extend(err.reason.as_bytes());
                }
            }
        }

        path.pop();
        let hash = xxh3_64(&input);
        if low >= depth {
            self.known.insert(identity, hash);
        }
        (hash, low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect_struct;
    use std::sync::{Arc, OnceLock};

    #[derive(Debug)]
    struct Pair {
        left: u32,
        right: Option<String>,
    }

    inspect_struct!(Pair { left, right });

    #[derive(Debug)]
    struct Link {
        label: String,
        next: OnceLock<Arc<Link>>,
    }

    inspect_struct!(Link { label, next });

    fn link(label: &str) -> Arc<Link> {
        Arc::new(Link {
            label: label.to_string(),
            next: OnceLock::new(),
        })
    }

    fn fingerprint(value: &dyn Inspect) -> u64 {
        Fingerprints::default().of(value)
    }

    #[test]
    fn test_equal_content_same_fingerprint() {
        let a = Pair {
            left: 1,
            right: Some("x".to_string()),
        };
        let b = Pair {
            left: 1,
            right: Some("x".to_string()),
        };
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_content_changes_fingerprint() {
        let mut pair = Pair {
            left: 1,
            right: None,
        };
        let before = fingerprint(&pair);

        pair.left = 2;
        let after_leaf = fingerprint(&pair);
        assert_ne!(before, after_leaf);

        pair.right = Some(String::new());
        assert_ne!(after_leaf, fingerprint(&pair));
    }

    #[test]
    fn test_leaf_type_is_part_of_fingerprint() {
        assert_ne!(fingerprint(&1u32), fingerprint(&1u64));
    }

    #[test]
    fn test_cycles_terminate_and_distinguish_content() {
        let ring = |first: &str, second: &str| {
            let a = link(first);
            let b = link(second);
            let _ = a.next.set(Arc::clone(&b));
            let _ = b.next.set(Arc::clone(&a));
            a
        };
        let (ab, ab_again, ac) = (ring("a", "b"), ring("a", "b"), ring("a", "c"));

        assert_eq!(fingerprint(&ab), fingerprint(&ab_again));
        assert_ne!(fingerprint(&ab), fingerprint(&ac));
    }

    #[test]
    fn test_nodes_inside_a_cycle_are_not_remembered() {
        let a = link("a");
        let b = link("b");
        let _ = a.next.set(Arc::clone(&b));
        let _ = b.next.set(Arc::clone(&a));

        let mut prints = Fingerprints::default();
        prints.of(&*a);
        assert!(prints.known.contains_key(&Identity::of(&*a)));
        assert!(!prints.known.contains_key(&Identity::of(&*b)));
    }
}
