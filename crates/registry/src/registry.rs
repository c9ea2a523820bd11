use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use bazaar_catalog::{Catalog, CatalogBus, CatalogHandle, CatalogId, CatalogRef};
use bazaar_core::{AggregateId, DomainError, DomainResult, ParticipantId};
use bazaar_events::{EventBus, EventEnvelope};

use crate::config::{ProvisionPolicy, RegistryConfig};
use crate::event::{CatalogProvisioned, ParticipantRegistered, RegistryEvent};
use crate::participant::{Participant, ParticipantRecord};
use crate::snapshot::{ParticipantSnapshot, RegistrySnapshot};

/// Aggregate type recorded on every registry envelope.
pub const AGGREGATE_TYPE: &str = "registry";

/// Bus carrying registry notifications.
///
/// `publish` runs while the registry lock is held; an implementation must
/// not call back into the registry.
pub type RegistryBus = Arc<dyn EventBus<EventEnvelope<RegistryEvent>>>;

/// Directory state guarded by the registry lock.
///
/// `order` lists exactly the keys of `participants`, in registration order.
#[derive(Debug, Default)]
struct Directory {
    participants: HashMap<ParticipantId, Participant>,
    order: Vec<ParticipantId>,
    version: u64,
}

/// Process-wide participant directory and catalog factory.
///
/// All directory reads and writes go through one lock. Catalogs handed out
/// by the registry have their own locks, so catalog traffic never contends
/// with onboarding.
pub struct Registry {
    id: AggregateId,
    config: RegistryConfig,
    directory: Mutex<Directory>,
    bus: Option<RegistryBus>,
    catalog_bus: Option<CatalogBus>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("participants", &self.participant_count())
            .finish_non_exhaustive()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            id: AggregateId::new(),
            config,
            directory: Mutex::new(Directory::default()),
            bus: None,
            catalog_bus: None,
        }
    }

    /// Publish registry notifications to `bus`.
    pub fn with_bus(mut self, bus: RegistryBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Hand `bus` to every catalog this registry provisions.
    pub fn with_catalog_bus(mut self, bus: CatalogBus) -> Self {
        self.catalog_bus = Some(bus);
        self
    }

    pub fn id(&self) -> AggregateId {
        self.id
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Onboard `caller`. A second call for the same identity fails.
    pub fn register(&self, caller: ParticipantId) -> DomainResult<()> {
        let mut directory = self.lock_for_write()?;

        if directory.participants.contains_key(&caller) {
            tracing::debug!(%caller, "duplicate registration rejected");
            return Err(DomainError::already_registered(caller));
        }

        let now = Utc::now();
        directory
            .participants
            .insert(caller, Participant::new(caller, now));
        directory.order.push(caller);

        self.publish(
            &mut directory,
            RegistryEvent::ParticipantRegistered(ParticipantRegistered {
                participant: caller,
                occurred_at: now,
            }),
        );

        tracing::info!(participant = %caller, total = directory.order.len(), "participant registered");
        Ok(())
    }

    /// Create the one catalog `caller` may own.
    ///
    /// What a repeated call does is decided by [`ProvisionPolicy`].
    pub fn provision_catalog(&self, caller: ParticipantId) -> DomainResult<CatalogRef> {
        let mut directory = self.lock_for_write()?;

        let participant = directory
            .participants
            .get_mut(&caller)
            .ok_or_else(|| {
                tracing::debug!(%caller, "provisioning rejected: not registered");
                DomainError::not_registered(caller)
            })?;

        if let Some(existing) = &participant.catalog {
            return match self.config.provision_policy {
                ProvisionPolicy::RejectExisting => {
                    tracing::debug!(%caller, catalog_id = %existing.id(), "provisioning rejected: already provisioned");
                    Err(DomainError::already_provisioned(caller))
                }
                ProvisionPolicy::ReturnExisting => Ok(Arc::clone(existing)),
            };
        }

        let catalog_id = CatalogId::new(AggregateId::new());
        let catalog: CatalogRef = Arc::new(CatalogHandle::new(
            Catalog::new(catalog_id, caller, self.config.price_rule),
            self.catalog_bus.clone(),
        ));
        participant.catalog = Some(Arc::clone(&catalog));

        self.publish(
            &mut directory,
            RegistryEvent::CatalogProvisioned(CatalogProvisioned {
                participant: caller,
                catalog_id,
                occurred_at: Utc::now(),
            }),
        );

        tracing::info!(participant = %caller, %catalog_id, "catalog provisioned");
        Ok(catalog)
    }

    /// The catalog provisioned for `identity`.
    ///
    /// Fails with `NotRegistered` both for unknown identities and for
    /// registered identities that never provisioned a catalog.
    pub fn catalog_of(&self, identity: ParticipantId) -> DomainResult<CatalogRef> {
        self.read()
            .participants
            .get(&identity)
            .and_then(|p| p.catalog.clone())
            .ok_or(DomainError::not_registered(identity))
    }

    /// Every registered identity, in registration order.
    pub fn list_all_participants(&self) -> Vec<ParticipantId> {
        self.read().order.clone()
    }

    pub fn is_registered(&self, identity: ParticipantId) -> bool {
        self.read().participants.contains_key(&identity)
    }

    pub fn participant(&self, identity: ParticipantId) -> ParticipantRecord {
        self.read()
            .participants
            .get(&identity)
            .map(Participant::record)
            .unwrap_or_else(|| ParticipantRecord::unregistered(identity))
    }

    pub fn participant_count(&self) -> usize {
        self.read().order.len()
    }

    /// Read-only export of the whole directory, catalogs included.
    ///
    /// The directory is copied under the registry lock; catalogs are read
    /// after it is released, so a busy catalog never stalls onboarding.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let entries: Vec<_> = {
            let directory = self.read();
            directory
                .order
                .iter()
                .filter_map(|identity| directory.participants.get(identity))
                .map(|p| (p.identity, p.registered_at, p.catalog.clone()))
                .collect()
        };

        let participants = entries
            .into_iter()
            .map(|(identity, registered_at, catalog)| ParticipantSnapshot {
                identity,
                registered_at,
                catalog: catalog.map(|c| c.snapshot()),
            })
            .collect();

        RegistrySnapshot {
            registry_id: self.id,
            taken_at: Utc::now(),
            participants,
        }
    }

    fn lock_for_write(&self) -> DomainResult<MutexGuard<'_, Directory>> {
        self.directory
            .lock()
            .map_err(|_| DomainError::Poisoned("registry"))
    }

    // Writers check everything before touching the directory, so a poisoned
    // guard still holds consistent state for readers.
    fn read(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bump the directory version and publish under the registry lock.
    fn publish(&self, directory: &mut Directory, event: RegistryEvent) {
        directory.version += 1;
        let Some(bus) = &self.bus else { return };

        let envelope = EventEnvelope::wrap(self.id, AGGREGATE_TYPE, directory.version, event);
        let event_type = envelope.event_type();
        if let Err(e) = bus.publish(envelope) {
            tracing::warn!(registry_id = %self.id, event_type, error = %e, "failed to publish registry event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_catalog::Price;

    fn with_policy(policy: ProvisionPolicy) -> Registry {
        Registry::new(RegistryConfig::default().with_provision_policy(policy))
    }

    #[test]
    fn register_twice_fails_and_stays_registered() {
        let registry = Registry::default();
        let alice = ParticipantId::new();

        registry.register(alice).unwrap();
        let err = registry.register(alice).unwrap_err();

        assert_eq!(err, DomainError::already_registered(alice));
        assert!(registry.is_registered(alice));
        assert_eq!(registry.list_all_participants(), vec![alice]);
    }

    #[test]
    fn unregistered_identity_cannot_provision_or_look_up() {
        let registry = Registry::default();
        let ghost = ParticipantId::new();

        assert_eq!(
            registry.provision_catalog(ghost).unwrap_err(),
            DomainError::not_registered(ghost)
        );
        assert_eq!(
            registry.catalog_of(ghost).unwrap_err(),
            DomainError::not_registered(ghost)
        );
        assert!(!registry.is_registered(ghost));
    }

    #[test]
    fn registered_but_unprovisioned_lookup_fails_uniformly() {
        let registry = Registry::default();
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();

        assert_eq!(
            registry.catalog_of(alice).unwrap_err(),
            DomainError::not_registered(alice)
        );
    }

    #[test]
    fn provisioned_catalog_is_owned_by_caller() {
        let registry = Registry::default();
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();

        let catalog = registry.provision_catalog(alice).unwrap();
        let looked_up = registry.catalog_of(alice).unwrap();

        assert_eq!(looked_up.owner(), alice);
        assert!(Arc::ptr_eq(&catalog, &looked_up));
        assert_eq!(registry.participant(alice).catalog_id, Some(catalog.id()));
    }

    #[test]
    fn reject_existing_policy_fails_second_provisioning() {
        let registry = with_policy(ProvisionPolicy::RejectExisting);
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();
        let first = registry.provision_catalog(alice).unwrap();

        let err = registry.provision_catalog(alice).unwrap_err();

        assert_eq!(err, DomainError::already_provisioned(alice));
        assert!(Arc::ptr_eq(&first, &registry.catalog_of(alice).unwrap()));
    }

    #[test]
    fn return_existing_policy_hands_back_same_catalog() {
        let registry = with_policy(ProvisionPolicy::ReturnExisting);
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();
        let first = registry.provision_catalog(alice).unwrap();
        first.add_item(alice, "Laptop", Price::new(1)).unwrap();

        let second = registry.provision_catalog(alice).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.item_count(), 1);
    }

    #[test]
    fn participants_listed_in_registration_order() {
        let registry = Registry::default();
        assert!(registry.list_all_participants().is_empty());

        let a = ParticipantId::new();
        let b = ParticipantId::new();
        registry.register(a).unwrap();
        registry.register(b).unwrap();
        let _ = registry.register(a);

        assert_eq!(registry.list_all_participants(), vec![a, b]);
        assert_eq!(registry.participant_count(), 2);
    }

    #[test]
    fn unknown_identity_has_blank_record() {
        let registry = Registry::default();
        let ghost = ParticipantId::new();

        let record = registry.participant(ghost);

        assert_eq!(record.identity, ghost);
        assert!(!record.is_registered);
        assert!(!record.has_catalog());
        assert!(record.registered_at.is_none());
    }

    #[test]
    fn catalogs_get_the_configured_price_rule() {
        let registry = Registry::new(
            RegistryConfig::default().with_price_rule(bazaar_catalog::PriceRule::positive()),
        );
        let alice = ParticipantId::new();
        registry.register(alice).unwrap();
        let catalog = registry.provision_catalog(alice).unwrap();

        let err = catalog.add_item(alice, "Free", Price::ZERO).unwrap_err();

        assert!(matches!(err, DomainError::InvalidItem(_)));
        assert_eq!(catalog.item_count(), 0);
    }
}
