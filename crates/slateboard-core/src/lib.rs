//! Slateboard Core Library
//!
//! Raster whiteboard core: a mutable pixel surface, pointer-driven stroke
//! painting, a linear undo/redo history of full-surface snapshots, and
//! persistence of boards as PNG-backed documents.

pub mod board;
pub mod camera;
pub mod codec;
pub mod engine;
pub mod history;
pub mod raster;
pub mod storage;
pub mod surface;
pub mod tools;

pub use board::{Board, BoardDocument, BoardError, DEFAULT_BACKGROUND};
pub use camera::Camera;
pub use codec::CodecError;
pub use engine::{DrawingEngine, EditKind, StrokeHandle, StrokeStyle};
pub use history::{HistoryLog, Snapshot};
pub use raster::BlendMode;
pub use surface::{RasterSurface, Rgba};
pub use tools::{ToolKind, ToolManager, ToolStyle, BRUSH_SIZES, PALETTE};
