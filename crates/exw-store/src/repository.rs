use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

/// Key/value persistence for client state. Values are plain JSON documents.
pub trait Repository: Send + Sync {
    /// The value under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for an invalid key, an unreadable backing store or
    /// a stored value that is not JSON.
    fn load_value(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for an invalid key or a failed write.
    fn save_value(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for an invalid key or a failed delete.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed access on top of [`Repository`].
pub trait RepositoryExt: Repository {
    /// Load and deserialize the value under `key`.
    ///
    /// # Errors
    ///
    /// As [`Repository::load_value`], plus `Serialization` when the stored JSON
    /// does not match `T`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.load_value(key)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Serialize and store `value` under `key`.
    ///
    /// # Errors
    ///
    /// As [`Repository::save_value`], plus `Serialization` when `value` cannot
    /// be represented as JSON.
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.save_value(key, &value)
    }
}

impl<R: Repository + ?Sized> RepositoryExt for R {}
