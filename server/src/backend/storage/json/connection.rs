use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// JsonConnection is a small key-value store on disk: one `<key>.json` file
/// per key under a base directory.
#[derive(Clone, Debug)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection, creating the base directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file that stores `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }

    /// Raw bytes stored under `key`, `None` if the key was never written
    pub fn read_key(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No stored value for key '{}' at {}", key, path.display());
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Overwrite the value under `key`
    pub fn write_key(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.key_path(key);

        // Atomic write using temp file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Wrote {} bytes to key '{}'", contents.len(), key);
        Ok(())
    }

    /// Copy the current value of `key` aside as `<key>.json.bak`
    pub fn backup_key(&self, key: &str) -> Result<PathBuf> {
        let path = self.key_path(key);
        let backup_path = path.with_extension("json.bak");
        fs::copy(&path, &backup_path)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        Ok(backup_path)
    }
}
