//! Board storage on the local filesystem.

use super::{validate_document, BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardDocument;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores each board as `<id>.json` under a root directory.
///
/// Writes go through a temporary file that is renamed into place, so a
/// crash mid-save never leaves a half-written board behind.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn new(root: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the per-user default storage directory
    /// (`<data dir>/slateboard/boards`, falling back to the home
    /// directory when the platform has no data dir).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir().or_else(dirs::home_dir).ok_or_else(|| {
            StorageError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no data or home directory for this user",
            ))
        })?;
        Self::new(base.join("slateboard").join("boards"))
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        // Board ids become filenames, so anything that could escape the
        // root directory is squashed.
        let safe: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);
        let document = document.clone();
        Box::pin(async move {
            let json = document.to_json()?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &path)?;
            log::debug!("saved board {} to {}", document.id, path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>> {
        let path = self.path_for(id);
        let id = id.to_owned();
        Box::pin(async move {
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => return Err(e.into()),
            };
            let doc = BoardDocument::from_json(&json)?;
            validate_document(&doc)?;
            Ok(doc)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);
        Box::pin(async move {
            match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let root = self.root.clone();
        Box::pin(async move {
            let mut ids = Vec::new();
            for entry in fs::read_dir(&root)? {
                let path = entry?.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem() {
                        ids.push(stem.to_string_lossy().into_owned());
                    }
                }
            }
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.path_for(id);
        Box::pin(async move { Ok(path.try_exists()?) })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::block_on;
    use super::*;
    use crate::board::Board;

    fn open_temp() -> (tempfile::TempDir, FileStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("boards")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_roundtrip_reconstructs_the_board() {
        let (_dir, storage) = open_temp();
        let doc = Board::new(8, 8).to_document().unwrap();

        block_on(storage.save(&doc.id, &doc)).unwrap();
        let loaded = block_on(storage.load(&doc.id)).unwrap();
        assert_eq!(loaded.image, doc.image);

        let board = Board::from_document(&loaded).unwrap();
        assert_eq!(board.engine.surface().width(), 8);
    }

    #[test]
    fn test_missing_board() {
        let (_dir, storage) = open_temp();
        assert!(matches!(
            block_on(storage.load("missing")),
            Err(StorageError::NotFound(_))
        ));
        assert!(!block_on(storage.exists("missing")).unwrap());
    }

    #[test]
    fn test_list_and_delete() {
        let (_dir, storage) = open_temp();
        let doc = Board::new(8, 8).to_document().unwrap();

        block_on(storage.save("a", &doc)).unwrap();
        block_on(storage.save("b", &doc)).unwrap();
        // Stray files without a .json extension are not board ids
        fs::write(storage.base_path().join("notes.txt"), "x").unwrap();

        let mut ids = block_on(storage.list()).unwrap();
        ids.sort();
        assert_eq!(ids, ["a", "b"]);

        block_on(storage.delete("a")).unwrap();
        block_on(storage.delete("a")).unwrap();
        assert!(!block_on(storage.exists("a")).unwrap());
        assert!(block_on(storage.exists("b")).unwrap());
    }

    #[test]
    fn test_ids_cannot_escape_the_root() {
        let (_dir, storage) = open_temp();
        let doc = Board::new(8, 8).to_document().unwrap();

        block_on(storage.save("../evil/../id", &doc)).unwrap();
        let ids = block_on(storage.list()).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(!ids[0].contains('/'));
    }

    #[test]
    fn test_corrupt_file_on_disk() {
        let (_dir, storage) = open_temp();
        fs::write(storage.base_path().join("broken.json"), "not json at all").unwrap();

        assert!(matches!(
            block_on(storage.load("broken")),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_load_rejects_mismatched_dimensions() {
        let (_dir, storage) = open_temp();
        let mut doc = Board::new(8, 8).to_document().unwrap();
        doc.width = 80;
        block_on(storage.save("lying", &doc)).unwrap();

        assert!(matches!(
            block_on(storage.load("lying")),
            Err(StorageError::ImageSize { .. })
        ));
    }
}
