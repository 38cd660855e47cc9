use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ClientError;

pub const PLAYER_NAME_KEY: &str = "player_name";

/// Small string key-value store backed by a JSON file. Without a path it
/// only lives in memory.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl ProfileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened profile {} ({} keys)", path.display(), values.len());

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a value and write the file through.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.get(PLAYER_NAME_KEY).filter(|name| !name.trim().is_empty())
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<(), ClientError> {
        self.set(PLAYER_NAME_KEY, name)
    }

    fn save(&self) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(path, text)?;
        Ok(())
    }
}
