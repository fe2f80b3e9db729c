//! Built-in leaf comparators.
//!
//! Leaves have no fields, so without a comparator structural recursion would
//! report any two integers as equal. These comparators give the std scalar
//! types (and JSON numbers) `PartialEq` semantics.

use super::ComparatorRegistry;

macro_rules! register_eq {
    ($registry:expr, $($ty:ty),* $(,)?) => {
        $( $registry.register::<$ty, _>(|a, b| a == b); )*
    };
}

/// Install `PartialEq` comparators for the std leaf types.
pub(crate) fn install(registry: &mut ComparatorRegistry) {
    register_eq!(
        registry,
        i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
        String, &'static str, (), serde_json::Number,
    );
}
