//! In-memory board storage for tests and ephemeral sessions.

use super::{validate_document, BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardDocument;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keeps board documents in a map; nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    boards: Mutex<HashMap<String, BoardDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means a test panicked mid-save; the map itself
    /// is still usable.
    fn boards(&self) -> MutexGuard<'_, HashMap<String, BoardDocument>> {
        self.boards.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_owned();
        let document = document.clone();
        Box::pin(async move {
            self.boards().insert(id, document);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let id = id.to_owned();
        Box::pin(async move {
            let doc = self
                .boards()
                .get(&id)
                .cloned()
                .ok_or_else(|| StorageError::NotFound(id))?;
            validate_document(&doc)?;
            Ok(doc)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_owned();
        Box::pin(async move {
            self.boards().remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(self.boards().keys().cloned().collect()) })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_owned();
        Box::pin(async move { Ok(self.boards().contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::block_on;
    use super::*;
    use crate::board::Board;

    fn sample_document() -> BoardDocument {
        Board::new(8, 8).to_document().unwrap()
    }

    #[test]
    fn test_save_then_load_returns_same_board() {
        let storage = MemoryStorage::new();
        let doc = sample_document();

        block_on(storage.save("sketch", &doc)).unwrap();
        let loaded = block_on(storage.load("sketch")).unwrap();

        assert_eq!(loaded.id, doc.id);
        assert_eq!(loaded.image, doc.image);
        assert!(block_on(storage.exists("sketch")).unwrap());
    }

    #[test]
    fn test_load_unknown_id() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            block_on(storage.load("nope")),
            Err(StorageError::NotFound(id)) if id == "nope"
        ));
        assert!(!block_on(storage.exists("nope")).unwrap());
    }

    #[test]
    fn test_delete_forgets_the_board() {
        let storage = MemoryStorage::new();
        block_on(storage.save("gone", &sample_document())).unwrap();
        block_on(storage.delete("gone")).unwrap();
        assert!(!block_on(storage.exists("gone")).unwrap());
        // Deleting twice stays a no-op
        block_on(storage.delete("gone")).unwrap();
    }

    #[test]
    fn test_list_all_saved_ids() {
        let storage = MemoryStorage::new();
        let doc = sample_document();
        block_on(storage.save("a", &doc)).unwrap();
        block_on(storage.save("b", &doc)).unwrap();

        let mut ids = block_on(storage.list()).unwrap();
        ids.sort();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_load_rejects_tampered_image() {
        let storage = MemoryStorage::new();
        let mut doc = sample_document();
        doc.image.truncate(doc.image.len() / 2);
        block_on(storage.save("bad", &doc)).unwrap();

        assert!(matches!(
            block_on(storage.load("bad")),
            Err(StorageError::Image(_))
        ));
    }
}
