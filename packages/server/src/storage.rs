//! File-backed key-value store.
//!
//! One `<key>.json` file per key inside the data directory. Writes go to a
//! sibling temp file first, are synced to disk and renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use times_algo::{KeyValueStore, PersistenceError, PersistenceResult};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::info!(dir = %dir.display(), "file store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PersistenceResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(PersistenceError::Unavailable(format!(
                "invalid storage key {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        if let Err(err) = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %cleanup, "temp file left behind");
                }
            }
            return Err(err.into());
        }

        tracing::trace!(key, bytes = value.len(), "value written");
        Ok(())
    }
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.read("mathtrainer_v1").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();

        store.write("mathtrainer_v1", "{}").unwrap();
        store.write("mathtrainer_v1", r#"{"2x3":{"correct":1,"wrong":0}}"#).unwrap();

        assert_eq!(
            store.read("mathtrainer_v1").unwrap().as_deref(),
            Some(r#"{"2x3":{"correct":1,"wrong":0}}"#)
        );
        assert!(!dir.path().join("mathtrainer_v1.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        // a directory in the target's place makes the rename fail
        std::fs::create_dir(dir.path().join("mathtrainer_v1.json")).unwrap();

        assert!(store.write("mathtrainer_v1", "{}").is_err());
        assert!(!dir.path().join("mathtrainer_v1.json.tmp").exists());
    }

    #[test]
    fn test_open_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.read("../escape").is_err());
        assert!(store.write("a/b", "x").is_err());
        assert!(store.read("").is_err());
    }
}
