use crate::{
    domain::Board,
    error::{KanbanError, Result},
    storage::{codec, KeyValueStore},
};
use tracing::{debug, warn};

/// Reads and writes the whole board snapshot under one key.
///
/// Every save replaces the full document; there is no partial write.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the persisted boards.
    ///
    /// A missing key and an undecodable document both yield an empty
    /// snapshot. Only a failing backend is returned as an error.
    pub fn load(&self) -> Result<Vec<Board>> {
        let Some(text) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no snapshot stored");
            return Ok(Vec::new());
        };

        match codec::decode_document(&text) {
            Ok(decoded) => {
                if decoded.migrated() {
                    warn!(
                        key = %self.key,
                        shape = ?decoded.shape,
                        "snapshot is in a legacy layout, it will be rewritten on next save"
                    );
                }
                Ok(decoded.boards)
            }
            Err(KanbanError::UnsupportedSnapshotVersion { found, supported }) => {
                warn!(
                    key = %self.key,
                    found,
                    supported,
                    "snapshot was written by a newer version, ignoring it; the next save will overwrite it"
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed snapshot");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the persisted snapshot with `boards`
    pub fn save(&self, boards: &[Board]) -> Result<()> {
        let text = codec::encode(boards)?;
        self.store.set(&self.key, &text)?;
        debug!(key = %self.key, boards = boards.len(), bytes = text.len(), "snapshot saved");
        Ok(())
    }
}
