//! Serializable export of the registry and its catalogs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::CatalogSnapshot;
use bazaar_core::{AggregateId, ParticipantId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub identity: ParticipantId,
    pub registered_at: DateTime<Utc>,
    pub catalog: Option<CatalogSnapshot>,
}

/// Point-in-time view of the directory, participants in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub registry_id: AggregateId,
    pub taken_at: DateTime<Utc>,
    pub participants: Vec<ParticipantSnapshot>,
}

impl RegistrySnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn participant(&self, identity: ParticipantId) -> Option<&ParticipantSnapshot> {
        self.participants.iter().find(|p| p.identity == identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;
    use bazaar_catalog::Price;

    #[test]
    fn snapshot_lists_participants_and_catalog_items() {
        let registry = Registry::default();
        let alice = ParticipantId::new();
        let bob = ParticipantId::new();
        registry.register(alice).unwrap();
        registry.register(bob).unwrap();
        let catalog = registry.provision_catalog(alice).unwrap();
        catalog.add_item(alice, "Laptop", Price::new(100)).unwrap();

        let snapshot = registry.snapshot();

        assert_eq!(snapshot.registry_id, registry.id());
        let order: Vec<_> = snapshot.participants.iter().map(|p| p.identity).collect();
        assert_eq!(order, vec![alice, bob]);

        let alice_catalog = snapshot.participant(alice).unwrap().catalog.as_ref().unwrap();
        assert_eq!(alice_catalog.owner, alice);
        assert_eq!(alice_catalog.items.len(), 1);
        assert_eq!(alice_catalog.items[0].name(), "Laptop");
        assert!(snapshot.participant(bob).unwrap().catalog.is_none());
    }

    #[test]
    fn json_export_reads_back() {
        let registry = Registry::default();
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();
        registry
            .provision_catalog(alice)
            .unwrap()
            .add_item(alice, "Tv", Price::new(1_000_000_000_000_000_000))
            .unwrap();

        let snapshot = registry.snapshot();
        let json = snapshot.to_json().unwrap();

        assert_eq!(RegistrySnapshot::from_json(&json).unwrap(), snapshot);
    }
}
