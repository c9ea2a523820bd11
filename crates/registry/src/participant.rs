use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_catalog::{CatalogId, CatalogRef};
use bazaar_core::ParticipantId;

/// Directory entry for a registered participant.
///
/// Only registered identities get an entry, so `is_registered` is implied by
/// presence. `catalog` is set at most once and never replaced.
#[derive(Debug, Clone)]
pub(crate) struct Participant {
    pub(crate) identity: ParticipantId,
    pub(crate) registered_at: DateTime<Utc>,
    pub(crate) catalog: Option<CatalogRef>,
}

impl Participant {
    pub(crate) fn new(identity: ParticipantId, registered_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            registered_at,
            catalog: None,
        }
    }

    pub(crate) fn record(&self) -> ParticipantRecord {
        ParticipantRecord {
            identity: self.identity,
            is_registered: true,
            catalog_id: self.catalog.as_ref().map(|c| c.id()),
            registered_at: Some(self.registered_at),
        }
    }
}

/// Public per-identity record.
///
/// Looking up an identity that never registered yields the blank record
/// (`is_registered == false`, no catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub identity: ParticipantId,
    pub is_registered: bool,
    pub catalog_id: Option<CatalogId>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl ParticipantRecord {
    pub(crate) fn unregistered(identity: ParticipantId) -> Self {
        Self {
            identity,
            is_registered: false,
            catalog_id: None,
            registered_at: None,
        }
    }

    pub fn has_catalog(&self) -> bool {
        self.catalog_id.is_some()
    }
}
