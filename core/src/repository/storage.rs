use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{data_dir, STORAGE_KEY};

/// A single named blob. The record store reads and rewrites it whole.
pub trait BlobStorage {
    /// `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;
    fn write(&self, bytes: &[u8]) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct FileBlobStorage {
    file_path: PathBuf,
}

impl FileBlobStorage {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = data_dir(base_dir)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;
        path.push(format!("{}.json", STORAGE_KEY));

        Ok(FileBlobStorage { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl BlobStorage for FileBlobStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.file_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Could not read {}", self.file_path.display())),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Could not write {}", self.file_path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        Ok(())
    }
}

/// In-memory blob, for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryBlobStorage {
    blob: RefCell<Option<Vec<u8>>>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: RefCell::new(Some(bytes.into())),
        }
    }

    /// Replaces the blob behind the store's back.
    pub fn overwrite(&self, bytes: impl Into<Vec<u8>>) {
        *self.blob.borrow_mut() = Some(bytes.into());
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

impl<S: BlobStorage + ?Sized> BlobStorage for &S {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }
}
