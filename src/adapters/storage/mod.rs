//! Storage Adapters
//!
//! Implementations of the KeyValueStore port.
//!
//! - **FileKeyValueStore** - one JSON file per slot in a data directory
//! - **InMemoryKeyValueStore** - slots held in memory (testing/ephemeral runs)

mod file_key_value_store;
mod in_memory_key_value_store;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
