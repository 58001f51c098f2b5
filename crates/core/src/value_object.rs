//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Catalog entries
/// and item keys are value objects: two entries with the same name, unit and
/// threshold are interchangeable.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Unit(String);
///
/// impl ValueObject for Unit {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
