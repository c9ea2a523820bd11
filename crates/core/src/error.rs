//! Domain error model.

use thiserror::Error;

use crate::id::{ItemId, ParticipantId};

/// Result type used across the registry and catalogs.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a rejected request: the operation that produced it left
/// no partial state behind, and the core never retries on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// `register` called a second time for the same identity.
    #[error("participant {0} is already registered")]
    AlreadyRegistered(ParticipantId),

    /// Provisioning or catalog lookup for an identity without a catalog to
    /// hand out (never registered, or registered but never provisioned).
    #[error("participant {0} is not registered")]
    NotRegistered(ParticipantId),

    /// A second provisioning call under the reject-existing policy.
    #[error("participant {0} already has a catalog")]
    AlreadyProvisioned(ParticipantId),

    /// A catalog mutation attempted by someone other than its owner.
    #[error("caller {caller} does not own this catalog (owner: {owner})")]
    NotOwner {
        caller: ParticipantId,
        owner: ParticipantId,
    },

    /// Malformed item data (blank name, price outside the configured rule).
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Item id outside `0..item_count`.
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// An internal lock was poisoned by a panicking thread.
    #[error("internal state unavailable: {0} lock poisoned")]
    Poisoned(&'static str),
}

impl DomainError {
    pub fn already_registered(identity: ParticipantId) -> Self {
        Self::AlreadyRegistered(identity)
    }

    pub fn not_registered(identity: ParticipantId) -> Self {
        Self::NotRegistered(identity)
    }

    pub fn already_provisioned(identity: ParticipantId) -> Self {
        Self::AlreadyProvisioned(identity)
    }

    pub fn not_owner(caller: ParticipantId, owner: ParticipantId) -> Self {
        Self::NotOwner { caller, owner }
    }

    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }

    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }
}
