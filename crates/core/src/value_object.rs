//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. `Price`, `Email` and `Address` are value objects, while
//! `Customer` and `Item` are entities.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PhoneNumber {
///     number: String,
///     country_calling_code: String,
/// }
///
/// impl ValueObject for PhoneNumber {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
