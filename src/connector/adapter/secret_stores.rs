use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::application::SecretStore;
use crate::domain::DomainError;

/// Reads secrets from the process environment, upper-casing the key
/// (`groq_api_key` → `GROQ_API_KEY`).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for EnvSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key.to_ascii_uppercase())
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// Flat `key = "value"` TOML file, e.g. `~/.mechanic/secrets.toml`:
///
/// ```toml
/// groq_api_key = "gsk_..."
/// ```
///
/// Non-string values are ignored.
#[derive(Debug, Clone)]
pub struct TomlSecretStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl TomlSecretStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let store = Self::parse(&raw, path)?;
        debug!("Loaded {} secret(s) from {}", store.values.len(), path.display());
        Ok(store)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, DomainError> {
        let table: toml::Table = raw.parse().map_err(|e| {
            DomainError::configuration(format!("invalid secrets file {}: {e}", path.display()))
        })?;

        let values = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretStore for TomlSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Consults each store in order; the first hit wins.
#[derive(Default)]
pub struct ChainedSecretStore {
    stores: Vec<Box<dyn SecretStore>>,
}

impl ChainedSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: impl SecretStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }
}

impl std::fmt::Debug for ChainedSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedSecretStore")
            .field("stores", &self.stores.len())
            .finish()
    }
}

impl SecretStore for ChainedSecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.stores.iter().find_map(|s| s.get(key))
    }
}
