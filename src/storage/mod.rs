//! Key-Value Storage
//!
//! The durable store behind the history list: opaque string blobs under
//! string keys. `MemoryStore` backs tests and embedded hosts, `FileStore`
//! keeps one file per key on the local device.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::QuickQrResult;

/// Get/set/remove of opaque string blobs
pub trait KeyValueStore: Send {
    /// Read a blob; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> QuickQrResult<Option<String>>;

    /// Write a blob, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> QuickQrResult<()>;

    /// Delete a blob; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> QuickQrResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> QuickQrResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> QuickQrResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> QuickQrResult<()> {
        (**self).remove(key)
    }
}
