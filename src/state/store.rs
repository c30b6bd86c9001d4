use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored value is not valid UTF-8")]
    NotUtf8,
    #[error("store rejected the write: {0}")]
    Rejected(String),
}

/// Opaque key-value byte storage that saved designs live in
pub trait BlobStore {
    fn put(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Option<Vec<u8>>;
}

/// Store that lives only as long as the session
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn put(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), blob.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }
}

/// Adapts the app's persistent [`eframe::Storage`] (local storage on the
/// web, a RON file natively). Values must be UTF-8.
pub struct EframeStore<'a> {
    storage: &'a mut dyn eframe::Storage,
}

impl<'a> EframeStore<'a> {
    pub fn new(storage: &'a mut dyn eframe::Storage) -> Self {
        Self { storage }
    }
}

impl BlobStore for EframeStore<'_> {
    fn put(&mut self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        let text = std::str::from_utf8(blob).map_err(|_| StoreError::NotUtf8)?;
        self.storage.set_string(key, text.to_owned());
        self.storage.flush();
        Ok(())
    }

    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.storage.get_string(key).map(String::into_bytes)
    }
}
