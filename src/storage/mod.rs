use crate::error::Result;

pub mod codec;
pub mod memory_storage;
pub mod snapshot_store;

#[cfg(feature = "file-storage")]
pub mod file_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStore;
pub use memory_storage::MemoryStore;
pub use snapshot_store::SnapshotStore;

/// Synchronous string key-value store holding serialized documents
pub trait KeyValueStore {
    /// Reads the value under `key`, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
