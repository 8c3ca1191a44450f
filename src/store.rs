use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

pub const AUTHENTICATED: &str = "authenticated";
pub const BASE_REPO: &str = "baseRepo";
pub const COLOR_MODE: &str = "colorMode";

/// Key for a feature's last selected tab, namespaced by a caller-supplied
/// identifier.
pub fn tab_key(id: &str) -> String {
    format!("tab:{id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

/// Persisted key/value state, one JSON object in one file.
///
/// Single writer per key, last write wins; concurrent processes are not
/// coordinated. The store is a cache: losing it costs a login or a
/// preference, so IO failures log a warning instead of failing the caller.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl StateStore {
    /// Opens the store at `path`. A missing or unreadable file loads as
    /// empty.
    pub fn open(path: impl Into<PathBuf>) -> StateStore {
        let path = path.into();
        let values = fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();

        StateStore { path, values }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?.clone();
        serde_json::from_value(value).ok()
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not serialize state key {key}: {err}");
                return;
            }
        };

        self.values.insert(key.to_string(), value);
        self.flush();
    }

    pub fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(
                    "Could not create state directory {}: {err}",
                    parent.display()
                );
                return;
            }
        }

        let body = match serde_json::to_vec_pretty(&self.values) {
            Ok(body) => body,
            Err(err) => {
                warn!("Could not serialize state file: {err}");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, body) {
            warn!("Could not write state file {}: {err}", self.path.display());
        }
    }
}
