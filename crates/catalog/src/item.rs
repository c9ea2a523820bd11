use serde::{Deserialize, Serialize};

use bazaar_core::{Entity, ItemId};

use crate::price::Price;

/// A named, priced, availability-flagged record inside a catalog.
///
/// `id`, `name` and `price` are fixed once listed; only `is_available`
/// may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) price: Price,
    pub(crate) is_available: bool,
}

impl Item {
    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    /// The `(id, name, price, is_available)` tuple external callers read.
    pub fn into_parts(self) -> (ItemId, String, Price, bool) {
        (self.id, self.name, self.price, self.is_available)
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
