//! Small key/value persistence: `localStorage` in the browser, one JSON file
//! per key under the platform data directory natively.

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no writable data directory")]
    NoDataDir,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Per-user data directory (`~/.local/share/pitchcraft` and friends).
#[cfg(not(target_arch = "wasm32"))]
pub fn data_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("app", "Pitchcraft", "Pitchcraft")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

#[cfg(not(target_arch = "wasm32"))]
fn item_path(key: &str) -> Result<PathBuf> {
    let safe: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    Ok(data_dir()?.join(format!("{safe}.json")))
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
}

pub fn read_item(key: &str) -> Result<Option<String>> {
    #[cfg(target_arch = "wasm32")]
    {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match std::fs::read_to_string(item_path(key)?) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn write_item(key: &str, value: &str) -> Result<()> {
    #[cfg(target_arch = "wasm32")]
    {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let path = item_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, value)?;
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_safe_file_names() {
        let Ok(path) = item_path("auth-storage/../x") else {
            // Sandboxed CI without a home directory.
            return;
        };
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert_eq!(name, "auth-storage____x.json");
    }

    #[test]
    fn corrupt_records_convert() {
        let err: StorageError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
