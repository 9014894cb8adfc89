//! JSON data-file persistence for the request store.
//!
//! The whole collection lives in one JSON document alongside the id
//! counter, loaded into a [`MemoryStore`] for the duration of a command and
//! written back afterwards. Writes go through a temp file and rename so an
//! interrupted save never truncates the data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use echo_core::{MemoryStore, RequestStore};
use echo_model::EchoRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataFile {
    /// Next storage id to hand out; never decreases, even across deletes.
    pub next_id: u64,
    pub requests: Vec<EchoRequest>,
}

/// Load the store from `path`. A missing file is an empty store.
pub fn load_store(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        debug!(path = %path.display(), "data file missing, starting empty");
        return Ok(MemoryStore::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("read data file {}", path.display()))?;
    let data: DataFile = serde_json::from_str(&text)
        .with_context(|| format!("parse data file {}", path.display()))?;
    debug!(
        path = %path.display(),
        records = data.requests.len(),
        "data file loaded"
    );
    Ok(MemoryStore::from_records(data.next_id, data.requests))
}

/// Persist the store back to `path`.
pub fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let data = DataFile {
        next_id: store.next_id(),
        requests: store.snapshot(),
    };
    let text = serde_json::to_string_pretty(&data).context("serialize data file")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replace data file {}", path.display()))?;
    debug!(path = %path.display(), records = data.requests.len(), "data file saved");
    Ok(())
}
