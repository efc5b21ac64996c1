//! Storage backends for the [`KeyValueStore`](crate::domain::ports::KeyValueStore) port.

pub mod in_memory;
pub mod json_file;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
