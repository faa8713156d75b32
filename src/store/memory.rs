//! In-memory key-value storage.

use std::{cell::RefCell, collections::BTreeMap};

use super::{KeyValueStorage, StorageError};

/// Key-value storage held in process memory.
///
/// Useful for tests and for previews where nothing should outlive the page.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage with a single pre-populated entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();

        storage.entries.borrow_mut().insert(key.into(), value.into());

        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_get_remove() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("k")?, None);

        storage.set("k", "v1")?;
        storage.set("k", "v2")?;

        assert_eq!(storage.get("k")?.as_deref(), Some("v2"));

        storage.remove("k")?;
        storage.remove("k")?;

        assert_eq!(storage.get("k")?, None);

        Ok(())
    }
}
