use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::store::Store;

const PREFERENCES_FILE: &str = "preferences.json";

/// File-backed store: a single JSON object of string values.
pub struct JsonStore {
    base_dir: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        let values = Self::load(&base_dir.join(PREFERENCES_FILE));
        Ok(Self { base_dir, values })
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(PREFERENCES_FILE)
    }

    // A missing or unreadable file is treated as empty.
    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::debug!(path = %path.display(), error = %e, "discarding corrupt store file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    fn save(&self) -> Result<()> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(&self.values)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        store.set("colorScheme", "dark").unwrap();

        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("colorScheme").as_deref(), Some("dark"));
        assert!(!dir.path().join("preferences.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "{ not json").unwrap();

        let mut store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.get("language"), None);

        // Next write replaces the corrupt file.
        store.set("language", "en").unwrap();
        let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("language").as_deref(), Some("en"));
    }
}
