//! Storage catalogs: metadata stores keyed by storage handle.
//!
//! The resolver only ever asks for one column of one row, which is all
//! [`MediaCatalog`] offers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CatalogError;
use crate::types::handle::StorageHandle;

/// Column holding the stored display name of a video.
pub const DISPLAY_NAME: &str = "_display_name";

/// One catalog row, reduced to the requested columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl CatalogRow {
    pub fn with_column(mut self, field: &str, value: impl Into<String>) -> Self {
        self.columns.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.columns.get(field).map(String::as_str)
    }
}

pub trait MediaCatalog {
    /// Returns the first row stored for `handle`, projected on `field`.
    fn query(&self, handle: &StorageHandle, field: &str)
    -> Result<Option<CatalogRow>, CatalogError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub handle: StorageHandle,
    #[serde(flatten)]
    pub row: CatalogRow,
}

/// Catalog kept in memory. Several entries may share a handle; only the first counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, handle: StorageHandle, row: CatalogRow) {
        self.entries.push(CatalogEntry { handle, row });
    }

    /// Shorthand for a row carrying only a display name.
    pub fn insert_display_name(&mut self, handle: StorageHandle, name: impl Into<String>) {
        self.insert(handle, CatalogRow::default().with_column(DISPLAY_NAME, name));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MediaCatalog for MemoryCatalog {
    fn query(
        &self,
        handle: &StorageHandle,
        field: &str,
    ) -> Result<Option<CatalogRow>, CatalogError> {
        let row = self
            .entries
            .iter()
            .find(|entry| &entry.handle == handle)
            .map(|entry| {
                let mut projected = CatalogRow::default();
                if let Some(value) = entry.row.get(field) {
                    projected.columns.insert(field.to_string(), value.to_string());
                }
                projected
            });
        Ok(row)
    }
}

/// Catalog read from a JSON file of the form
/// `{ "entries": [ { "handle": "content://media/7", "columns": { "_display_name": "a/b.mp4" } } ] }`.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    inner: MemoryCatalog,
}

impl JsonCatalog {
    pub fn load_from_file(path: &Path) -> Result<JsonCatalog, CatalogError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        let inner: MemoryCatalog = serde_json::from_str(&json)?;
        tracing::debug!(path = %path.display(), entries = inner.len(), "Catalog loaded");
        Ok(JsonCatalog { inner })
    }
}

impl MediaCatalog for JsonCatalog {
    fn query(
        &self,
        handle: &StorageHandle,
        field: &str,
    ) -> Result<Option<CatalogRow>, CatalogError> {
        self.inner.query(handle, field)
    }
}
