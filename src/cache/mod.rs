// Cache module.
// Session-scoped storage plus the TTL-bounded stats cache built on it.

pub mod storage;
pub mod store;

pub use storage::{MemoryStorage, SessionStorage};
pub use store::{CacheEnvelope, CacheStore};
