use anyhow::Context;
#[cfg(test)]
use mockall::automock;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Durable string key-value storage, the terminal counterpart of browser local storage.
#[cfg_attr(test, automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Keeps every entry in one JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read store {}", self.path.display()))
            }
        };
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store {}", self.path.display()))
    }

    /// Writes next to the target and renames over it, so readers never see a partial file.
    fn write(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create directory {}", directory.display()))?;

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize store")?;
        let mut file = NamedTempFile::new_in(directory)
            .with_context(|| format!("Failed to create temporary file in {}", directory.display()))?;
        file.write_all(contents.as_bytes())
            .context("Failed to write temporary store file")?;
        file.as_file()
            .sync_all()
            .context("Failed to flush temporary store file")?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to replace store {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries()?.remove(key))
    }

    /// A store that cannot be read is replaced rather than blocking every later write.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.entries().unwrap_or_else(|err| {
            tracing::warn!("Discarding unreadable store: {err:?}");
            BTreeMap::new()
        });
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonFileStore, KeyValueStore};
    use std::fs;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("any").unwrap(), None);
    }

    #[test]
    fn test_values_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = JsonFileStore::new(&path);
        store.set("first", "1").unwrap();
        store.set("second", "2").unwrap();
        store.set("first", "one").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("first").unwrap().as_deref(), Some("one"));
        assert_eq!(reopened.get("second").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupt_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.get("first").is_err());
    }

    #[test]
    fn test_truncated_file_is_replaced_on_next_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{\"carpark_finder_last_shown_version\": \"v1\"").unwrap();

        let store = JsonFileStore::new(&path);
        store
            .set("carpark_finder_update_banner_dismissed", "true")
            .unwrap();

        assert_eq!(
            store
                .get("carpark_finder_update_banner_dismissed")
                .unwrap()
                .as_deref(),
            Some("true")
        );
        assert_eq!(store.get("carpark_finder_last_shown_version").unwrap(), None);
    }

    #[test]
    fn test_write_leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        store.set("first", "1").unwrap();
        store.set("second", "2").unwrap();

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }
}
