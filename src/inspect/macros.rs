//! Declarative implementation of [`Inspect`](crate::Inspect) for plain structs.

/// Implement [`Inspect`](crate::Inspect) for a struct with named fields.
///
/// Every listed field must itself implement `Inspect`; fields left out of
/// the list are invisible to the walker. The struct is rendered through its
/// `Debug` implementation unless `display` is given, in which case `Display`
/// is used.
///
/// ```
/// use structdiff::inspect_struct;
///
/// #[derive(Debug)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Debug)]
/// struct Customer {
///     name: String,
///     addr: Address,
///     notes: Option<String>,
/// }
///
/// inspect_struct!(Address { city });
/// inspect_struct!(Customer { name, addr, notes });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Inspect for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![$($crate::Field::of(::std::stringify!($field), &self.$field)),*]
            }

            fn render(&self) -> ::std::string::String {
                ::std::format!("{:?}", self)
            }
        }
    };
    ($ty:ty { $($field:ident),* $(,)? } display) => {
        impl $crate::Inspect for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![$($crate::Field::of(::std::stringify!($field), &self.$field)),*]
            }

            fn render(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(self)
            }
        }
    };
}
