use std::collections::BTreeMap;
use std::path::PathBuf;

use agenthub_core::onboarding::FlagStore;

/// Client flags persisted as a flat JSON object.
///
/// The file is read once on open and rewritten on every `set`. I/O and parse
/// failures are logged and otherwise ignored: a broken file reads as empty and
/// a failed write leaves only the in-memory value.
#[derive(Debug)]
pub struct JsonFileFlagStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileFlagStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring unreadable flag file: {e}");
                    BTreeMap::new()
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read flag file: {e}");
                BTreeMap::new()
            },
        };
        Self { path, values }
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to encode flags: {e}");
                return;
            },
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), "Failed to write flag file: {e}");
        }
    }
}

impl FlagStore for JsonFileFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }
}
