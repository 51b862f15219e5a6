//! Persistence boundary for per-character progress.
//!
//! The engine only needs get/set on a character-scoped key. Whether that is
//! an in-memory registry or a file on disk is up to the host.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use rampart_core::enums::CharacterId;
use tracing::warn;

/// Key-value storage injected into the engine.
pub trait ProgressStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), String>;
}

/// Storage key holding a character's total XP.
pub fn xp_key(character: CharacterId) -> String {
    format!("xp:{}", character.name())
}

/// Read a character's total XP. Missing entries load as 0; malformed ones
/// also load as 0, with a warning.
pub fn load_total_xp(store: &dyn ProgressStore, character: CharacterId) -> u64 {
    let key = xp_key(character);
    match store.get(&key) {
        None => 0,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(xp) => xp,
            Err(e) => {
                warn!(%key, value = %raw, error = %e, "Malformed stored XP, starting from zero");
                0
            }
        },
    }
}

pub fn save_total_xp(
    store: &mut dyn ProgressStore,
    character: CharacterId,
    total_xp: u64,
) -> Result<(), String> {
    store.set(&xp_key(character), total_xp.to_string())
}

/// Registry-style store that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), String> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Durable store: a flat JSON object on disk, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let json = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read progress file: {e}"))?;
            serde_json::from_str(&json)
                .map_err(|e| format!("Failed to parse progress file: {e}"))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), String> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create progress directory: {e}"))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| format!("Failed to serialize progress: {e}"))?;
        fs::write(&self.path, json).map_err(|e| format!("Failed to write progress file: {e}"))
    }
}

impl ProgressStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), String> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}
