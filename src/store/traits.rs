//! `KeyValueStore` trait — the single persistence interface the funnel
//! builds on.
//!
//! Values are JSON. A key that was never written, and a stored payload that
//! no longer parses as JSON, both read back as `None`: corruption degrades
//! to absence rather than surfacing as an error.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic key/value store with JSON values.
///
/// Writes overwrite any prior value and are visible to subsequent reads on
/// the same store. Last write wins per key; no cross-client coordination.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Write `value` under `key`, overwriting any prior value.
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), StoreError>;

    /// Read the value under `key`.
    ///
    /// Returns `Ok(None)` if the key was never written or if the stored
    /// payload fails to parse.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Delete the value under `key`. Returns whether a value was removed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;
}
