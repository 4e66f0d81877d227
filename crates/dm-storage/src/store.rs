//! Key-value store abstraction
//!
//! Mirrors the browser `localStorage` contract: string keys, string values,
//! removal of a missing key is not an error.

use crate::Result;

pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written or was removed
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Idempotent.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Remove several keys, stopping at the first failure
    fn remove_items(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}
