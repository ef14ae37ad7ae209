use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
};

use anyhow::Context;

/// String key/value store persisted as one JSON object on disk, mirroring the
/// browser's `localStorage`. Every write is flushed immediately.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parse local storage {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read local storage {}", path.display()))
            }
        };
        Ok(Self { path, items })
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    pub fn remove_item(&mut self, key: &str) -> anyhow::Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&self.items)?)
            .with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_storage_path(tag: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("lexiflow-{}-{}-{}", tag, std::process::id(), nanos));
    path.push("storage.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let path = temp_storage_path("missing");
        let storage = LocalStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("user"), None);
        assert!(!path.exists());
    }

    #[test]
    fn writes_survive_reopen() {
        let path = temp_storage_path("reopen");
        let mut storage = LocalStorage::open(&path).unwrap();
        storage.set_item("emailHistory", "[]".into()).unwrap();
        storage.set_item("user", r#"{"token":"t"}"#.into()).unwrap();
        storage.remove_item("user").unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("emailHistory"), Some("[]"));
        assert_eq!(reopened.get_item("user"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_storage_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(LocalStorage::open(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
