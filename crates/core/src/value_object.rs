//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and never change once built. Two values
/// with the same attributes are the same value:
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Price(u128);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(100), Price(100));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
