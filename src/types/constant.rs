/// Version of the dispatcher, stamped into audit events for lineage debugging.
pub const DISPATCHER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Actor recorded on audit events emitted by the sweeper rather than a person.
pub const SYSTEM_ACTOR: &str = "system:sweeper";

/// How many times `create_offer` retries after an optimistic-concurrency
/// conflict before surfacing the conflict to the caller.
pub const MAX_CREATE_RETRIES: u32 = 3;

pub const OFFERS_COLLECTION: &str = "offers";
pub const JOBS_COLLECTION: &str = "jobs";
pub const AUDIT_EVENTS_COLLECTION: &str = "audit_events";
