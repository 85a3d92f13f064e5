use super::{KeyValueStore, StoreError};
use log::*;
use std::{
    fs, io,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Stores each key as a `<key>.json` file inside a directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a failed write leaves the previous value intact.
///
#[derive(Clone, Debug)]
pub struct FileStore {
    dir_path: PathBuf,
}

impl FileStore {
    /// Returns a store rooted at the given directory. The directory is
    /// created on first write.
    ///
    pub fn new(dir_path: impl Into<PathBuf>) -> FileStore {
        FileStore {
            dir_path: dir_path.into(),
        }
    }

    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let file_path = self.file_path(key);
        match fs::read_to_string(&file_path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored value at {}", file_path.display());
                Ok(None)
            }
            Err(e) => Err(StoreError::ReadFailed {
                path: file_path,
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.dir_path.exists() {
            fs::create_dir_all(&self.dir_path).map_err(|e| StoreError::CreateDirectoryFailed {
                path: self.dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = self.file_path(key);
        replace_file(&self.dir_path, &file_path, |file| {
            file.write_all(value.as_bytes())
        })
        .map_err(|e| StoreError::WriteFailed {
            path: file_path.clone(),
            source: e,
        })?;
        debug!("Wrote {} bytes to {}", value.len(), file_path.display());
        Ok(())
    }
}

/// Fill a temporary file in `dir` with `write`, then move it over `target`.
/// On any error the temporary file is removed and `target` is untouched.
///
fn replace_file<F>(dir: &Path, target: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let mut staged = NamedTempFile::new_in(dir)?;
    write(staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppState;
    use crate::store::{Persistence, STORAGE_KEY};

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("absent").unwrap().is_none());
    }

    #[test]
    fn set_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("store"));
        store.set("doc", "{\"a\":1}").unwrap();
        assert!(store.dir_path().join("doc.json").exists());
        assert_eq!(store.get("doc").unwrap().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn failed_write_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut persistence = Persistence::new(FileStore::new(dir.path()));
        assert!(persistence.save(&AppState::default()));

        let store = FileStore::new(dir.path());
        let seed = serde_json::to_string(&AppState::seed()).unwrap();
        let result = replace_file(dir.path(), &store.file_path(STORAGE_KEY), |file| {
            file.write_all(&seed.as_bytes()[..seed.len() / 2])?;
            Err(io::Error::new(io::ErrorKind::Other, "File too large"))
        });
        assert!(result.is_err());

        let reopened = Persistence::new(FileStore::new(dir.path()));
        assert_eq!(reopened.load(), AppState::default());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1, "{:?}", names);
    }

    #[test]
    fn directory_in_place_of_value_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("doc.json")).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.get("doc"),
            Err(StoreError::ReadFailed { .. })
        ));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("doc", "first value").unwrap();
        store.set("doc", "second").unwrap();
        assert_eq!(store.get("doc").unwrap().as_deref(), Some("second"));
    }
}
