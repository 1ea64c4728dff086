//! Keyed JSON document collections

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use drivesafe_types::{Result, Route, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::read_store_file;

/// A value stored under its own id
pub trait Document: Serialize + DeserializeOwned + Clone {
    fn document_id(&self) -> &str;
}

impl Document for UserProfile {
    fn document_id(&self) -> &str {
        &self.uid
    }
}

impl Document for Route {
    fn document_id(&self) -> &str {
        &self.id
    }
}

/// One collection persisted as `<collection>.json`
pub struct DocumentStore<T: Document> {
    store_path: PathBuf,
    documents: BTreeMap<String, T>,
}

impl<T: Document> DocumentStore<T> {
    /// Create or load a collection
    pub fn open(store_dir: PathBuf, collection: &str) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(format!("{}.json", collection));
        let documents = read_store_file(&store_path)?.unwrap_or_default();
        Ok(Self {
            store_path,
            documents,
        })
    }

    /// Write `documents` to disk, then make it the in-memory state
    fn commit(&mut self, documents: BTreeMap<String, T>) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &documents)?;
        writer.flush()?;
        self.documents = documents;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.documents.get(id)
    }

    /// Insert or overwrite the document under its id
    pub fn set(&mut self, document: T) -> Result<()> {
        let id = document.document_id().to_string();
        debug!(collection = %self.store_path.display(), id = %id, "document set");
        let mut next = self.documents.clone();
        next.insert(id, document);
        self.commit(next)
    }

    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if !self.documents.contains_key(id) {
            return Ok(false);
        }
        let mut next = self.documents.clone();
        next.remove(id);
        self.commit(next)?;
        Ok(true)
    }

    /// All documents ordered by id
    pub fn all(&self) -> Vec<&T> {
        self.documents.values().collect()
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }
}
