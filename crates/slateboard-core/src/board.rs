//! Board runtime state: engine + camera + tools, wired to pointer events.

use crate::camera::Camera;
use crate::codec::{self, CodecError};
use crate::engine::{DrawingEngine, EditKind, StrokeHandle};
use crate::raster::{self, BlendMode};
use crate::surface::Rgba;
use crate::tools::{ToolKind, ToolManager};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Background the original whiteboard painted its canvas with.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::new(0x1e, 0x29, 0x3b, 255);

/// Errors from board-level operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("document is {doc_width}x{doc_height} but the surface is {width}x{height}")]
    DimensionMismatch {
        doc_width: u32,
        doc_height: u32,
        width: u32,
        height: u32,
    },
}

/// A serialized board: metadata plus the current snapshot as a PNG data
/// URL. This is what storage backends persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDocument {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `image/png` base64 data URL of the snapshot at save time.
    pub image: String,
}

impl BoardDocument {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// In-progress pointer gesture.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    Idle,
    Stroking(StrokeHandle),
    Shaping { anchor: Point },
    Panning { last: Point },
}

/// Runtime board state (not persisted).
///
/// Maps pointer events delivered in screen coordinates to engine calls in
/// surface-local coordinates, keeping one undo step per gesture.
#[derive(Debug, Clone)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub engine: DrawingEngine,
    pub camera: Camera,
    pub tools: ToolManager,
    gesture: Gesture,
    pending_text: Option<Point>,
}

impl Board {
    /// Create a board over a fresh surface with the default background.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, DEFAULT_BACKGROUND)
    }

    pub fn with_background(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            engine: DrawingEngine::new(width, height, background),
            camera: Camera::new(),
            tools: ToolManager::new(),
            gesture: Gesture::Idle,
            pending_text: None,
        }
    }

    /// Reconstruct a board from a saved document. The decoded image is
    /// pushed as a history entry on top of the blank initial snapshot.
    pub fn from_document(doc: &BoardDocument) -> Result<Self, BoardError> {
        let mut board = Self::new(doc.width, doc.height);
        board.id = doc.id.clone();
        board.name = doc.name.clone();
        board.apply_document(doc)?;
        Ok(board)
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    /// Pointer pressed at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        let surface_point = self.camera.screen_to_surface(screen);
        self.gesture = match self.tools.current_tool {
            ToolKind::Freehand | ToolKind::Eraser => {
                // stroke_style is always Some for stroke tools
                match self.tools.stroke_style() {
                    Some(style) => Gesture::Stroking(self.engine.begin_stroke(style, surface_point)),
                    None => Gesture::Idle,
                }
            }
            ToolKind::Rectangle | ToolKind::Ellipse => Gesture::Shaping {
                anchor: self.engine.surface().clamp_point(surface_point),
            },
            ToolKind::Text => {
                self.pending_text = Some(self.engine.surface().clamp_point(surface_point));
                Gesture::Idle
            }
            ToolKind::Move => Gesture::Panning { last: screen },
        };
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen: Point) {
        match self.gesture {
            Gesture::Stroking(handle) => {
                let surface_point = self.camera.screen_to_surface(screen);
                self.engine.extend_stroke(handle, surface_point);
            }
            Gesture::Panning { last } => {
                self.camera.pan(screen - last);
                self.gesture = Gesture::Panning { last: screen };
            }
            Gesture::Shaping { .. } | Gesture::Idle => {}
        }
    }

    /// Pointer released at a screen position, ending the gesture.
    pub fn pointer_up(&mut self, screen: Point) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Stroking(handle) => {
                self.engine.commit_stroke(handle);
            }
            Gesture::Shaping { anchor } => {
                let surface_point = self.camera.screen_to_surface(screen);
                let corner = self.engine.surface().clamp_point(surface_point);
                self.commit_shape(anchor, corner);
            }
            Gesture::Panning { .. } | Gesture::Idle => {}
        }
    }

    /// Rasterize the shape for the current tool and commit it as one
    /// discrete edit. Drags that collapse to a point are dropped.
    fn commit_shape(&mut self, anchor: Point, corner: Point) {
        if (anchor.x - corner.x).abs() < 1.0 && (anchor.y - corner.y).abs() < 1.0 {
            return;
        }
        let style = self.tools.style;
        let painted = match self.tools.current_tool {
            ToolKind::Rectangle => raster::stroke_rect(
                self.engine.surface_mut(),
                anchor,
                corner,
                style.width,
                style.color,
                BlendMode::Paint,
            ),
            ToolKind::Ellipse => raster::stroke_ellipse(
                self.engine.surface_mut(),
                anchor,
                corner,
                style.width,
                style.color,
                BlendMode::Paint,
            ),
            _ => 0,
        };
        if painted > 0 {
            self.engine.commit_discrete_edit(EditKind::Shape);
        }
    }

    /// Position awaiting text insertion, if the text tool was clicked.
    pub fn pending_text(&self) -> Option<Point> {
        self.pending_text
    }

    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    /// Commit a text insertion. The host rasterizes glyphs onto
    /// `engine.surface_mut()` at [`Board::pending_text`] before calling
    /// this; the board only records the edit in history.
    pub fn commit_text(&mut self) -> bool {
        if self.pending_text.take().is_none() {
            return false;
        }
        self.engine.commit_discrete_edit(EditKind::Text);
        true
    }

    /// Repaint the background and commit the clear as one history entry.
    pub fn clear(&mut self) {
        self.engine.surface_mut().clear();
        self.engine.commit_discrete_edit(EditKind::Clear);
    }

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.engine.redo()
    }

    /// Serialize the board for persistence.
    pub fn to_document(&self) -> Result<BoardDocument, CodecError> {
        Ok(BoardDocument {
            id: self.id.clone(),
            name: self.name.clone(),
            width: self.engine.surface().width(),
            height: self.engine.surface().height(),
            image: codec::to_data_url(self.engine.current_snapshot())?,
        })
    }

    /// Load a saved document onto the live surface. The decoded image is
    /// blitted and pushed as a new history entry, so the load itself is
    /// undoable. Surface dimensions are fixed for the session; a document
    /// of different size is rejected.
    pub fn apply_document(&mut self, doc: &BoardDocument) -> Result<(), BoardError> {
        let snapshot = codec::from_data_url(&doc.image)?;
        let surface = self.engine.surface_mut();
        if !snapshot.restore_to(surface) {
            return Err(BoardError::DimensionMismatch {
                doc_width: snapshot.width(),
                doc_height: snapshot.height(),
                width: surface.width(),
                height: surface.height(),
            });
        }
        self.engine.commit_discrete_edit(EditKind::ImageLoad);
        log::info!("loaded document {} ({})", doc.id, doc.name);
        Ok(())
    }

    /// Export the current snapshot as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, CodecError> {
        codec::encode_png(self.engine.current_snapshot())
    }
}
