use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{Aggregate, AggregateId, AggregateRoot, DomainError, ItemId, ParticipantId};
use bazaar_events::Event;

use crate::item::Item;
use crate::price::{Price, PriceRule};

/// Catalog identifier, assigned when the registry provisions the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub AggregateId);

impl CatalogId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Catalog.
///
/// The owner is fixed at construction. Items are only ever appended, and an
/// item's id is its position in `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    id: CatalogId,
    owner: ParticipantId,
    items: Vec<Item>,
    price_rule: PriceRule,
    version: u64,
}

impl Catalog {
    pub fn new(id: CatalogId, owner: ParticipantId, price_rule: PriceRule) -> Self {
        Self {
            id,
            owner,
            items: Vec::new(),
            price_rule,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> CatalogId {
        self.id
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn price_rule(&self) -> PriceRule {
        self.price_rule
    }

    pub fn item_count(&self) -> u64 {
        self.items.len() as u64
    }

    /// Id the next listed item will receive.
    pub fn next_item_id(&self) -> ItemId {
        ItemId::new(self.item_count())
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        id.index().and_then(|index| self.items.get(index))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl AggregateRoot for Catalog {
    type Id = CatalogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: ListItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub caller: ParticipantId,
    pub name: String,
    pub price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetAvailability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAvailability {
    pub caller: ParticipantId,
    pub item_id: ItemId,
    pub available: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogCommand {
    ListItem(ListItem),
    SetAvailability(SetAvailability),
}

/// Event: ItemListed. Carries the `(id, name, price)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListed {
    pub catalog_id: CatalogId,
    pub item_id: ItemId,
    pub name: String,
    pub price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAvailabilityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAvailabilityChanged {
    pub catalog_id: CatalogId,
    pub item_id: ItemId,
    pub available: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemListed(ItemListed),
    ItemAvailabilityChanged(ItemAvailabilityChanged),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemListed(_) => "catalog.item.listed",
            CatalogEvent::ItemAvailabilityChanged(_) => "catalog.item.availability_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ItemListed(e) => e.occurred_at,
            CatalogEvent::ItemAvailabilityChanged(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ItemListed(e) => {
                debug_assert_eq!(e.item_id, self.next_item_id());
                self.items.push(Item {
                    id: e.item_id,
                    name: e.name.clone(),
                    price: e.price,
                    is_available: true,
                });
            }
            CatalogEvent::ItemAvailabilityChanged(e) => {
                if let Some(item) = e.item_id.index().and_then(|i| self.items.get_mut(i)) {
                    item.is_available = e.available;
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::ListItem(cmd) => self.handle_list_item(cmd),
            CatalogCommand::SetAvailability(cmd) => self.handle_set_availability(cmd),
        }
    }
}

impl Catalog {
    fn ensure_owner(&self, caller: ParticipantId) -> Result<(), DomainError> {
        if caller != self.owner {
            return Err(DomainError::not_owner(caller, self.owner));
        }
        Ok(())
    }

    fn handle_list_item(&self, cmd: &ListItem) -> Result<Vec<CatalogEvent>, DomainError> {
        self.ensure_owner(cmd.caller)?;

        if cmd.name.trim().is_empty() {
            return Err(DomainError::invalid_item("name cannot be empty"));
        }
        self.price_rule.check(cmd.price)?;

        Ok(vec![CatalogEvent::ItemListed(ItemListed {
            catalog_id: self.id,
            item_id: self.next_item_id(),
            name: cmd.name.clone(),
            price: cmd.price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_availability(
        &self,
        cmd: &SetAvailability,
    ) -> Result<Vec<CatalogEvent>, DomainError> {
        self.ensure_owner(cmd.caller)?;

        let item = self
            .item(cmd.item_id)
            .ok_or(DomainError::not_found(cmd.item_id))?;

        // Already in the requested state: nothing to record.
        if item.is_available == cmd.available {
            return Ok(vec![]);
        }

        Ok(vec![CatalogEvent::ItemAvailabilityChanged(
            ItemAvailabilityChanged {
                catalog_id: self.id,
                item_id: cmd.item_id,
                available: cmd.available,
                occurred_at: cmd.occurred_at,
            },
        )])
    }
}
