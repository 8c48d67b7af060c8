//! Drawing history engine: applies pointer-driven strokes to the surface
//! and keeps every discrete edit recoverable via undo/redo.

use crate::history::{HistoryLog, Snapshot};
use crate::raster::{self, BlendMode};
use crate::surface::{RasterSurface, Rgba};
use kurbo::Point;

/// Style captured at the moment a stroke begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
    pub mode: BlendMode,
}

impl StrokeStyle {
    pub fn paint(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            mode: BlendMode::Paint,
        }
    }

    pub fn erase(width: f64) -> Self {
        Self {
            color: Rgba::transparent(),
            width,
            mode: BlendMode::Erase,
        }
    }
}

/// Handle identifying an in-progress stroke. Calls with a stale handle
/// (stroke already committed or superseded) are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeHandle(u64);

/// Non-stroke edits that are applied to the surface atomically and then
/// committed as one history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Shape,
    Text,
    Clear,
    ImageLoad,
}

/// Transient state of the stroke currently being drawn.
#[derive(Debug, Clone)]
struct ActiveStroke {
    id: u64,
    style: StrokeStyle,
    last: Point,
    painted: u64,
}

/// Owns the raster surface and its history log.
///
/// Single-threaded and synchronous: the host delivers pointer events in
/// order, at most one stroke is open at a time, and every operation runs to
/// completion. Snapshot capture is O(pixel count), so commits are batched
/// per gesture rather than per pointer movement.
#[derive(Debug, Clone)]
pub struct DrawingEngine {
    surface: RasterSurface,
    history: HistoryLog,
    active: Option<ActiveStroke>,
    stroke_counter: u64,
}

impl DrawingEngine {
    /// Create an engine over a fresh surface, seeding the history with the
    /// blank initial snapshot.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let surface = RasterSurface::new(width, height, background);
        let history = HistoryLog::new(Snapshot::of_surface(&surface));
        Self {
            surface,
            history,
            active: None,
            stroke_counter: 0,
        }
    }

    /// Like [`DrawingEngine::new`] but with a bounded history depth
    /// (oldest-entry eviction).
    pub fn with_history_depth(width: u32, height: u32, background: Rgba, depth: usize) -> Self {
        let surface = RasterSurface::new(width, height, background);
        let history = HistoryLog::with_max_depth(Snapshot::of_surface(&surface), depth);
        Self {
            surface,
            history,
            active: None,
            stroke_counter: 0,
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Mutable surface access for collaborators that apply discrete edits
    /// (text rasterization, image load) before calling
    /// [`DrawingEngine::commit_discrete_edit`].
    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Begin a transient stroke at `start` (clamped into bounds). Does not
    /// touch the history log.
    pub fn begin_stroke(&mut self, style: StrokeStyle, start: Point) -> StrokeHandle {
        if self.active.is_some() {
            log::warn!("stroke began while another was open; dropping the previous one");
        }
        self.stroke_counter += 1;
        let id = self.stroke_counter;
        self.active = Some(ActiveStroke {
            id,
            style,
            last: self.surface.clamp_point(start),
            painted: 0,
        });
        StrokeHandle(id)
    }

    /// Append a point to the active stroke and paint the incremental
    /// segment onto the live surface. This is the per-movement hot path; it
    /// never captures a snapshot.
    pub fn extend_stroke(&mut self, handle: StrokeHandle, point: Point) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.id != handle.0 {
            return;
        }
        let to = self.surface.clamp_point(point);
        active.painted += raster::paint_segment(
            &mut self.surface,
            active.last,
            to,
            active.style.width,
            active.style.color,
            active.style.mode,
        );
        active.last = to;
    }

    /// Finalize the stroke and append a snapshot of the surface.
    ///
    /// Returns false without touching the history when the handle is stale
    /// or the stroke painted zero pixels (empty clicks do not pollute the
    /// undo stack).
    pub fn commit_stroke(&mut self, handle: StrokeHandle) -> bool {
        if self.active.as_ref().map(|a| a.id) != Some(handle.0) {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };
        if active.painted == 0 {
            log::debug!("dropping empty stroke {}", active.id);
            return false;
        }
        self.history.push(Snapshot::of_surface(&self.surface));
        log::debug!(
            "committed stroke {} ({} pixels, history {}/{})",
            active.id,
            active.painted,
            self.history.cursor() + 1,
            self.history.len()
        );
        true
    }

    /// Commit a non-stroke edit (shape fill, text insertion, full clear,
    /// image load) already applied to the surface.
    pub fn commit_discrete_edit(&mut self, kind: EditKind) {
        self.history.push(Snapshot::of_surface(&self.surface));
        log::debug!(
            "committed {:?} edit (history {}/{})",
            kind,
            self.history.cursor() + 1,
            self.history.len()
        );
    }

    /// Step back one history entry and restore it onto the surface.
    /// Returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                snapshot.restore_to(&mut self.surface);
                true
            }
            None => false,
        }
    }

    /// Step forward one history entry and restore it onto the surface.
    /// Returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                snapshot.restore_to(&mut self.surface);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The snapshot at the history cursor, used by export/save
    /// collaborators.
    pub fn current_snapshot(&self) -> &Snapshot {
        self.history.current()
    }

    /// Copy the last committed snapshot back onto the live surface,
    /// discarding any uncommitted painting (true stroke abandonment).
    pub fn restore_current(&mut self) {
        self.active = None;
        self.history.current().restore_to(&mut self.surface);
    }
}
