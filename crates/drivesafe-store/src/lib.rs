//! File-backed stores
//!
//! `VehicleStore` holds the local garage; `DocumentStore` holds keyed JSON
//! documents (user profiles, routes).

mod documents;
mod vehicles;

pub use documents::{Document, DocumentStore};
pub use vehicles::VehicleStore;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use drivesafe_types::{Result, StoreError};
use serde::de::DeserializeOwned;

/// Read a JSON store file, `None` if it does not exist yet
fn read_store_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map(Some).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "store file is corrupted");
        StoreError::Corrupted {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}
