use crate::{
    error::{KanbanError, Result},
    storage::KeyValueStore,
};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// File-based store: one JSON document per key under a root directory
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const CORKBOARD_DIR: &'static str = ".corkboard";
    const EXTENSION: &'static str = "json";

    /// Creates a new FileStore for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::CORKBOARD_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn entry_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(KanbanError::StorageError(format!("invalid key: {key:?}")));
        }
        Ok(self.root_path.join(format!("{}.{}", key, Self::EXTENSION)))
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.entry_file(key)?;

        match fs::read_to_string(&file_path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.entry_file(key)?;
        self.ensure_directory_exists()?;

        // Rename over the target so readers never see a partial document
        let tmp_path = self.root_path.join(format!(".{}.{}.tmp", key, Self::EXTENSION));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &file_path)?;
        Ok(())
    }
}
