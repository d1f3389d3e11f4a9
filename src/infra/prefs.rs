//! Usage: Native key-value preferences (one JSON object per namespace under the app data dir).

use crate::app_paths;
use crate::shared::fs::{read_optional_file, write_file_atomic};
use crate::shared::mutex_ext::MutexExt;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const PREFS_NAMESPACE: &str = "kadekolku_prefs";
const PREFS_DIR_NAME: &str = "prefs";

pub trait PrefsStore: Send + Sync {
    fn put_string(&self, key: &str, value: &str) -> Result<(), String>;
    fn get_string(&self, key: &str) -> Result<Option<String>, String>;
}

pub struct FilePrefs {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePrefs {
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn open(app: &tauri::AppHandle, namespace: &str) -> Result<Self, String> {
        let dir = app_paths::app_data_dir(app)?.join(PREFS_DIR_NAME);
        Ok(Self::at(dir.join(format!("{namespace}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, String> {
        let Some(bytes) = read_optional_file(&self.path)? else {
            return Ok(Map::new());
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&bytes)
            .map_err(|e| format!("PREFS_PARSE: {}: {e}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => Err(format!(
                "PREFS_PARSE: {}: expected a JSON object",
                self.path.display()
            )),
        }
    }
}

impl PrefsStore for FilePrefs {
    fn put_string(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.write_lock.lock_or_recover();

        let mut map = match self.load() {
            Ok(map) => map,
            Err(err) => {
                // A corrupt prefs file must not block the mirror; start over.
                tracing::warn!("prefs file unreadable, rewriting: {}", err);
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        let bytes = serde_json::to_vec_pretty(&Value::Object(map))
            .map_err(|e| format!("PREFS_SERIALIZE: {e}"))?;
        write_file_atomic(&self.path, &bytes)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, String> {
        let map = self.load()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::PrefsStore;
    use crate::shared::mutex_ext::MutexExt;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MemoryPrefs {
        values: Mutex<BTreeMap<String, String>>,
        writes: Mutex<usize>,
    }

    impl MemoryPrefs {
        pub(crate) fn write_count(&self) -> usize {
            *self.writes.lock_or_recover()
        }
    }

    impl PrefsStore for MemoryPrefs {
        fn put_string(&self, key: &str, value: &str) -> Result<(), String> {
            *self.writes.lock_or_recover() += 1;
            self.values
                .lock_or_recover()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn get_string(&self, key: &str) -> Result<Option<String>, String> {
            Ok(self.values.lock_or_recover().get(key).cloned())
        }
    }
}
