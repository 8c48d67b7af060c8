//! Persistence backends for board documents.
//!
//! A saved board is a [`BoardDocument`]: JSON metadata with the snapshot
//! embedded as a PNG data URL. Backends treat the document as untrusted on
//! the way back in: `load` decodes the embedded image and checks it against
//! the recorded dimensions, so a tampered or truncated file surfaces as a
//! [`StorageError`] instead of a broken board.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::board::BoardDocument;
use crate::codec::{self, CodecError};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no board saved under id {0:?}")]
    NotFound(String),
    #[error("board file is not a valid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("embedded board image is unreadable: {0}")]
    Image(#[from] CodecError),
    #[error("document says {expected_width}x{expected_height} but its image is {width}x{height}")]
    ImageSize {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future returned by storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A place boards can be saved to and loaded from.
pub trait Storage: Send + Sync {
    /// Persist a board document under the given id.
    fn save(&self, id: &str, document: &BoardDocument) -> BoxFuture<'_, StorageResult<()>>;

    /// Load and validate a board document.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<BoardDocument>>;

    /// Remove a board. Deleting an id that was never saved is a no-op.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Ids of all saved boards.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Whether a board is saved under the given id.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Decode a loaded document's embedded image and check it against the
/// dimensions the metadata claims.
fn validate_document(doc: &BoardDocument) -> StorageResult<()> {
    let snapshot = codec::from_data_url(&doc.image)?;
    if snapshot.width() != doc.width || snapshot.height() != doc.height {
        return Err(StorageError::ImageSize {
            expected_width: doc.width,
            expected_height: doc.height,
            width: snapshot.width(),
            height: snapshot.height(),
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_validate_accepts_saved_board() {
        let doc = Board::new(6, 4).to_document().unwrap();
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn test_validate_rejects_garbled_image() {
        let mut doc = Board::new(6, 4).to_document().unwrap();
        doc.image = "data:image/png;base64,AAAA".to_string();
        assert!(matches!(validate_document(&doc), Err(StorageError::Image(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_dimensions() {
        let mut doc = Board::new(6, 4).to_document().unwrap();
        doc.width = 60;
        assert!(matches!(
            validate_document(&doc),
            Err(StorageError::ImageSize { expected_width: 60, width: 6, .. })
        ));
    }
}
