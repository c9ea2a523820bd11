//! Shared, lock-scoped catalog reference.
//!
//! Each catalog is its own lock domain: operations on one catalog never wait
//! on another catalog or on the registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use bazaar_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ItemId, ParticipantId};
use bazaar_events::{EventBus, EventEnvelope};

use crate::catalog::{Catalog, CatalogCommand, CatalogEvent, CatalogId, ListItem, SetAvailability};
use crate::item::Item;
use crate::price::Price;

/// Aggregate type recorded on every catalog envelope.
pub const AGGREGATE_TYPE: &str = "catalog";

/// Bus carrying catalog notifications.
///
/// `publish` runs while the publishing catalog's lock is held. An
/// implementation must not call back into that same catalog (reads
/// included), or the calling thread deadlocks.
pub type CatalogBus = Arc<dyn EventBus<EventEnvelope<CatalogEvent>>>;

/// The catalog reference handed out by the registry.
pub type CatalogRef = Arc<CatalogHandle>;

/// A catalog plus the lock that serializes its operations.
///
/// Reads are open to anyone; mutations are checked against the fixed owner.
pub struct CatalogHandle {
    id: CatalogId,
    owner: ParticipantId,
    state: Mutex<Catalog>,
    bus: Option<CatalogBus>,
}

impl core::fmt::Debug for CatalogHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogHandle")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("publishes", &self.bus.is_some())
            .finish_non_exhaustive()
    }
}

impl CatalogHandle {
    pub fn new(catalog: Catalog, bus: Option<CatalogBus>) -> Self {
        Self {
            id: catalog.id_typed(),
            owner: catalog.owner(),
            state: Mutex::new(catalog),
            bus,
        }
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    /// The participant this catalog belongs to. Fixed for its lifetime.
    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    /// Append a new item owned by `caller`'s catalog and return its id.
    pub fn add_item(
        &self,
        caller: ParticipantId,
        name: impl Into<String>,
        price: Price,
    ) -> DomainResult<ItemId> {
        let command = CatalogCommand::ListItem(ListItem {
            caller,
            name: name.into(),
            price,
            occurred_at: Utc::now(),
        });

        let mut catalog = self.lock_for_write()?;
        let item_id = catalog.next_item_id();
        let events = catalog.handle(&command).inspect_err(|e| {
            tracing::debug!(catalog_id = %self.id, %caller, error = %e, "list item rejected");
        })?;
        self.commit(&mut catalog, events);

        tracing::info!(catalog_id = %self.id, item_id = %item_id, price = %price, "item listed");
        Ok(item_id)
    }

    /// Flip an item's availability flag. Name, price and id stay as listed.
    pub fn set_availability(
        &self,
        caller: ParticipantId,
        item_id: ItemId,
        available: bool,
    ) -> DomainResult<()> {
        let command = CatalogCommand::SetAvailability(SetAvailability {
            caller,
            item_id,
            available,
            occurred_at: Utc::now(),
        });

        let mut catalog = self.lock_for_write()?;
        let events = catalog.handle(&command).inspect_err(|e| {
            tracing::debug!(catalog_id = %self.id, %caller, error = %e, "availability change rejected");
        })?;
        self.commit(&mut catalog, events);
        Ok(())
    }

    pub fn get_item(&self, id: ItemId) -> DomainResult<Item> {
        self.read()
            .item(id)
            .cloned()
            .ok_or(DomainError::not_found(id))
    }

    pub fn item_count(&self) -> u64 {
        self.read().item_count()
    }

    /// All items in id order.
    pub fn items(&self) -> Vec<Item> {
        self.read().items().to_vec()
    }

    pub fn version(&self) -> u64 {
        self.read().version()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let catalog = self.read();
        CatalogSnapshot {
            id: self.id,
            owner: self.owner,
            items: catalog.items().to_vec(),
        }
    }

    fn lock_for_write(&self) -> DomainResult<MutexGuard<'_, Catalog>> {
        self.state.lock().map_err(|_| DomainError::Poisoned("catalog"))
    }

    // State only changes after every check in `handle` passed, so a poisoned
    // guard still holds a consistent catalog for readers.
    fn read(&self) -> MutexGuard<'_, Catalog> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply and publish while still holding the catalog lock, so
    /// notifications leave in commit order. See [`CatalogBus`] for what
    /// that asks of the bus.
    fn commit(&self, catalog: &mut Catalog, events: Vec<CatalogEvent>) {
        for event in events {
            catalog.apply(&event);
            let Some(bus) = &self.bus else { continue };

            let envelope =
                EventEnvelope::wrap(self.id.0, AGGREGATE_TYPE, catalog.version(), event);
            let event_type = envelope.event_type();
            if let Err(e) = bus.publish(envelope) {
                tracing::warn!(catalog_id = %self.id, event_type, error = %e, "failed to publish catalog event");
            }
        }
    }
}

/// Serializable read-only view of one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub id: CatalogId,
    pub owner: ParticipantId,
    pub items: Vec<Item>,
}
