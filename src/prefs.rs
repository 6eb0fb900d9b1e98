//! Key-value preference persistence.
//!
//! The only persisted state is the active theme name, but the store is a
//! generic get/set-one-string capability so any backend can supply it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{tlog_debug, tlog_warn, Result};

/// Preference key holding the active theme name.
pub const THEME_KEY: &str = "theme";

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, used by tests and as a fallback when no home directory exists.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk (`~/.termfolio/prefs.json` by default).
///
/// A missing, unreadable, or corrupt file reads as empty; it is rewritten on
/// the next `set`.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: &Path) -> Self {
        let values = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tlog_warn!("Ignoring corrupt preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        tlog_debug!(
            "FilePreferences::open path={} keys={}",
            path.display(),
            values.len()
        );
        Self {
            path: path.to_path_buf(),
            values,
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}
