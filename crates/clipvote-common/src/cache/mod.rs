//! Capability-scoped TTL cache

mod ttl;

pub use ttl::TtlCache;
