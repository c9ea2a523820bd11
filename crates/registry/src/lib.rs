//! Participant registry.
//!
//! The registry onboards participants and provisions at most one catalog per
//! participant. It never looks inside a catalog; callers interact with the
//! returned [`CatalogRef`] directly.
//!
//! Lifecycle: build one [`Registry`] at process start, serve operations,
//! optionally take a [`RegistrySnapshot`] for export.

pub mod config;
pub mod event;
pub mod participant;
pub mod registry;
pub mod snapshot;

pub use bazaar_catalog::{CatalogRef, Price, PriceRule};
pub use config::{ConfigError, ProvisionPolicy, RegistryConfig};
pub use event::{CatalogProvisioned, ParticipantRegistered, RegistryEvent};
pub use participant::ParticipantRecord;
pub use registry::{Registry, RegistryBus};
pub use snapshot::{ParticipantSnapshot, RegistrySnapshot};
