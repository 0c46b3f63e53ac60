use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::names::normalize_name;
use crate::models::ServiceInterval;

/// Errors raised while loading a registry file
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write registry file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registry entry: display name and its service stints
#[derive(Debug, Clone)]
struct TenureEntry {
    name: String,
    normalized: String,
    intervals: Vec<ServiceInterval>,
}

/// Attorney name -> service intervals in the Solicitor General's office
///
/// Immutable once built. Entries keep the order of the source file, which
/// decides ties when two names normalize to the same key.
#[derive(Debug, Clone, Default)]
pub struct TenureRegistry {
    entries: Vec<TenureEntry>,
    exact: HashMap<String, usize>,
}

impl TenureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, intervals)` pairs; a repeated name keeps its first position
    /// and its intervals are appended
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<ServiceInterval>)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, intervals) in entries {
            registry.insert(name.into(), intervals);
        }
        registry
    }

    fn insert(&mut self, name: String, intervals: Vec<ServiceInterval>) {
        if let Some(&idx) = self.exact.get(&name) {
            self.entries[idx].intervals.extend(intervals);
            return;
        }
        self.exact.insert(name.clone(), self.entries.len());
        self.entries.push(TenureEntry {
            normalized: normalize_name(&name),
            name,
            intervals,
        });
    }

    /// Parse a registry JSON document (`{"Name": [{"start_year":..,"end_year":..}]}`)
    ///
    /// A name whose value is not a list of interval objects is dropped with a warning.
    /// A key repeated within the document keeps only its last value.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        let mut registry = Self::new();

        for (name, value) in map {
            match serde_json::from_value::<Vec<ServiceInterval>>(value) {
                Ok(intervals) => registry.insert(name, intervals),
                Err(e) => warn!("Skipping malformed registry entry {:?}: {}", name, e),
            }
        }

        Ok(registry)
    }

    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load the registry, falling back to an empty one on any failure
    ///
    /// With an empty registry no speaker is tenure-matched; only the
    /// description rules apply.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(registry) => {
                debug!("Loaded {} registry entries from {:?}", registry.len(), path);
                registry
            }
            Err(e) => {
                warn!("{}; continuing with an empty tenure registry", e);
                Self::new()
            }
        }
    }

    /// Serialize in registry order, the same shape `from_json` reads
    pub fn to_json_pretty(&self) -> Result<String, RegistryError> {
        let mut map = Map::new();
        for entry in &self.entries {
            map.insert(entry.name.clone(), serde_json::to_value(&entry.intervals)?);
        }
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }

    pub fn write_file(&self, path: &Path) -> Result<(), RegistryError> {
        std::fs::write(path, self.to_json_pretty()?).map_err(|source| RegistryError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in registry order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Service intervals for `name`: exact key first, then the first entry
    /// whose normalized name matches
    pub fn lookup(&self, name: &str) -> &[ServiceInterval] {
        if let Some(&idx) = self.exact.get(name) {
            return &self.entries[idx].intervals;
        }

        let key = normalize_name(name);
        self.entries
            .iter()
            .find(|e| e.normalized == key)
            .map(|e| e.intervals.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `name` held a qualifying office during `year`
    pub fn is_active(&self, name: Option<&str>, year: Option<i32>) -> bool {
        match (name, year) {
            (Some(name), Some(year)) => self.lookup(name).iter().any(|i| i.covers(year)),
            _ => false,
        }
    }
}
