//! Catalog domain module.
//!
//! A catalog is the append-only item store of exactly one participant. The
//! aggregate in [`catalog`] holds the business rules as pure decide/evolve
//! logic; [`handle`] wraps it in a single lock scope and publishes the
//! resulting notifications.

pub mod catalog;
pub mod handle;
pub mod item;
pub mod price;

pub use catalog::{
    Catalog, CatalogCommand, CatalogEvent, CatalogId, ItemAvailabilityChanged, ItemListed,
    ListItem, SetAvailability,
};
pub use handle::{CatalogBus, CatalogHandle, CatalogRef, CatalogSnapshot};
pub use item::Item;
pub use price::{Price, PriceRule};
