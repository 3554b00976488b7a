//! Local draft cache.
//!
//! Small JSON files in the data directory, keyed by kind and date. The plan
//! editor's autosave writes here so an interrupted edit survives until the
//! next run; a successful save to the database clears the draft.

use super::data_storage::DataStorage;
use anyhow::Result;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;

pub struct DraftCache {
    storage: DataStorage,
}

impl DraftCache {
    pub fn new() -> Self {
        Self { storage: DataStorage::new() }
    }

    fn file_name(kind: &str, date: NaiveDate) -> String {
        format!("draft_{}_{}.json", kind, date.format("%Y-%m-%d"))
    }

    pub fn store<T: Serialize>(&self, kind: &str, date: NaiveDate, value: &T) -> Result<()> {
        let path = self.storage.get_path(&Self::file_name(kind, date))?;
        fs::write(path, serde_json::to_vec_pretty(value)?)?;
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, kind: &str, date: NaiveDate) -> Result<Option<T>> {
        let path = self.storage.get_path(&Self::file_name(kind, date))?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub fn clear(&self, kind: &str, date: NaiveDate) -> Result<()> {
        let path = self.storage.get_path(&Self::file_name(kind, date))?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Default for DraftCache {
    fn default() -> Self {
        Self::new()
    }
}
