use crate::error::{AppError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use tracing::debug;

/// A single serde document on disk, read and written only through scoped
/// transactions.
///
/// A missing file reads as `D::default()`. Commits replace the file
/// atomically, so readers only ever see the state before or after a
/// transaction.
pub struct DocumentStore<D> {
    path: PathBuf,
    lock: Mutex<()>,
    _document: PhantomData<fn() -> D>,
}

impl<D> DocumentStore<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _document: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a snapshot of the document. Nothing is written.
    pub fn read<T>(&self, f: impl FnOnce(&D) -> T) -> Result<T> {
        let _guard = self.acquire()?;
        let document = self.load()?;
        Ok(f(&document))
    }

    /// Run `f` against the document and commit its changes.
    ///
    /// If `f` returns an error, or the commit fails, the file on disk is left
    /// exactly as it was.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut D) -> Result<T>) -> Result<T> {
        let _guard = self.acquire()?;
        let mut document = self.load()?;
        let output = f(&mut document)?;
        self.commit(&document)?;
        Ok(output)
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::Storage("Document lock poisoned".to_string()))
    }

    fn load(&self) -> Result<D> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(D::default()),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(D::default());
        }

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Storage(format!("Corrupt document {:?}: {}", self.path, e))
        })
    }

    fn commit(&self, document: &D) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!("Failed to create directory {:?}: {}", dir, e))
        })?;

        let staged = NamedTempFile::new_in(&dir)
            .map_err(|e| AppError::Storage(format!("Failed to stage document: {}", e)))?;

        {
            let mut writer = BufWriter::new(staged.as_file());
            serde_json::to_writer_pretty(&mut writer, document)
                .map_err(|e| AppError::Storage(format!("Failed to encode document: {}", e)))?;
            writer
                .flush()
                .map_err(|e| AppError::Storage(format!("Failed to write document: {}", e)))?;
        }
        staged
            .as_file()
            .sync_all()
            .map_err(|e| AppError::Storage(format!("Failed to sync document: {}", e)))?;

        staged.persist(&self.path).map_err(|e| {
            AppError::Storage(format!("Failed to replace {:?}: {}", self.path, e.error))
        })?;
        debug!(path = ?self.path, "Committed document");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Counter {
        #[serde(default)]
        hits: Option<Vec<u32>>,
    }

    fn temp_store() -> (TempDir, DocumentStore<Counter>) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = DocumentStore::new(temp_dir.path().join("counter.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_reads_default() {
        let (_dir, store) = temp_store();

        let hits = store.read(|doc| doc.hits.clone()).unwrap();

        assert_eq!(hits, None);
        assert!(!store.path().exists(), "reads must not create the file");
    }

    #[test]
    fn test_transaction_commits() {
        let (_dir, store) = temp_store();

        store
            .transaction(|doc| {
                doc.hits.get_or_insert_with(Vec::new).push(1);
                Ok(())
            })
            .unwrap();

        let reopened: DocumentStore<Counter> = DocumentStore::new(store.path());
        let hits = reopened.read(|doc| doc.hits.clone()).unwrap();
        assert_eq!(hits, Some(vec![1]));
    }

    #[test]
    fn test_failed_transaction_leaves_file_untouched() {
        let (_dir, store) = temp_store();
        store
            .transaction(|doc| {
                doc.hits = Some(vec![1]);
                Ok(())
            })
            .unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let result: Result<()> = store.transaction(|doc| {
            doc.hits.get_or_insert_with(Vec::new).push(2);
            Err(AppError::Storage("boom".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{not json").unwrap();

        let result = store.read(|doc| doc.hits.clone());

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[test]
    fn test_commit_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("counter.json");
        let store: DocumentStore<Counter> = DocumentStore::new(&path);

        store
            .transaction(|doc| {
                doc.hits = Some(Vec::new());
                Ok(())
            })
            .unwrap();

        assert!(path.exists());
    }
}
