use chrono::{DateTime, Utc};

/// A committed domain fact, ready to be wrapped in an envelope and published.
///
/// Implemented by the catalog and registry event enums. `event_type` strings
/// are stable (`"<aggregate>.<entity>.<verb>"`) so external consumers can
/// route on them without decoding the payload.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    /// Payload schema version for `event_type`.
    fn version(&self) -> u32;

    fn occurred_at(&self) -> DateTime<Utc>;
}
