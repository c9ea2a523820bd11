use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::CatalogId;
use bazaar_core::ParticipantId;
use bazaar_events::Event;

/// Event: ParticipantRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRegistered {
    pub participant: ParticipantId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CatalogProvisioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProvisioned {
    pub participant: ParticipantId,
    pub catalog_id: CatalogId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    ParticipantRegistered(ParticipantRegistered),
    CatalogProvisioned(CatalogProvisioned),
}

impl Event for RegistryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RegistryEvent::ParticipantRegistered(_) => "registry.participant.registered",
            RegistryEvent::CatalogProvisioned(_) => "registry.catalog.provisioned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RegistryEvent::ParticipantRegistered(e) => e.occurred_at,
            RegistryEvent::CatalogProvisioned(e) => e.occurred_at,
        }
    }
}
