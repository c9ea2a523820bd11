//! `bazaar-core`: domain foundation for the participant registry and catalogs.
//!
//! This crate holds **pure domain** primitives: identifiers, the error
//! taxonomy and the aggregate traits. No locking, no IO.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AggregateId, ItemId, ParticipantId};
pub use value_object::ValueObject;
