use std::sync::{Arc, RwLock};

use crate::error::StoreError;

use super::{IpRecord, StoredItem};

/// In-memory database backend for local development and testing.
/// Uses `Arc<RwLock<...>>` so clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryDb {
    items: Arc<RwLock<Vec<StoredItem>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_source_ip(&self, source_ip: &str) -> Result<(), StoreError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StoreError::Put(format!("Lock error: {e}")))?;
        items.push(IpRecord::new(source_ip).into());
        Ok(())
    }

    pub fn scan_source_ips(&self) -> Result<Vec<StoredItem>, StoreError> {
        let items = self
            .items
            .read()
            .map_err(|e| StoreError::Scan(format!("Lock error: {e}")))?;
        Ok(items.clone())
    }
}
