//! Entity trait: records that keep their identity while their state changes.

/// Something addressed by a stable id rather than by its contents.
///
/// Catalog items are entities: an item keeps its id when its availability
/// flips.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
