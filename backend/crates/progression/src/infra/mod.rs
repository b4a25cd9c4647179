//! Infrastructure Layer
//!
//! File-backed local stores and the PostgreSQL global time store.

pub mod external;
pub mod file_store;
pub mod global;
pub mod identity;
pub mod postgres;
pub mod progress;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::RankupResult;

/// Read a JSON document, `None` when the file does not exist yet
async fn read_json<T: DeserializeOwned>(path: &Path) -> RankupResult<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write a JSON document through a temporary file renamed into place
async fn write_json<T: Serialize>(path: &Path, value: &T) -> RankupResult<()> {
    let bytes = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
