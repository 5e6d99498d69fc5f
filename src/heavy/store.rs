use crate::dispatch::types::DispatchError;

use std::collections::HashMap;

/// Flat mapping from an opaque key to a large text blob.
///
/// Written once per key by producers (overwrites allowed, last write wins)
/// and read during task delivery. Independent of the task registry's
/// lifetime: a task may reference a key that is never, or not yet, populated.
#[derive(Debug, Default)]
pub struct HeavyStore {
    blobs: HashMap<String, String>,
}

impl HeavyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a blob under a key, overwriting any existing blob.
    ///
    /// An empty key is a validation error and leaves the store untouched.
    pub fn put(&mut self, key: &str, blob: String) -> Result<(), DispatchError> {
        if key.is_empty() {
            return Err(DispatchError::EmptyHeavyKey);
        }

        self.blobs.insert(key.to_string(), blob);

        tracing::info!("Stored heavy payload under key '{}'", key);

        Ok(())
    }

    /// Looks up a blob. `None` is a normal, expected outcome, not an error.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
