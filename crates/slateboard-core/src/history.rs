//! Linear undo/redo history of full-surface snapshots.

use crate::surface::{RasterSurface, Rgba};

/// An immutable full copy of the surface pixels at one point in time.
///
/// Owned exclusively by the [`HistoryLog`] once captured; the engine never
/// mutates a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Snapshot {
    /// Capture the current state of a surface. O(pixel count).
    pub fn of_surface(surface: &RasterSurface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            pixels: surface.pixels().to_vec(),
        }
    }

    /// Build a snapshot from decoded pixel data (e.g. a loaded image).
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Copy this snapshot's pixels back onto a surface of identical size.
    /// Returns false on a dimension mismatch.
    pub fn restore_to(&self, surface: &mut RasterSurface) -> bool {
        if self.width != surface.width() || self.height != surface.height() {
            return false;
        }
        surface.blit(&self.pixels)
    }
}

/// Ordered sequence of snapshots plus a cursor marking the currently
/// displayed entry.
///
/// Invariant: the sequence is never empty (it always contains at least the
/// initial snapshot) and `cursor < len`. Appending truncates any redo tail
/// first, so the history is strictly linear; an edit made after an undo
/// permanently discards the undone branch.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Snapshot>,
    cursor: usize,
    max_depth: Option<usize>,
}

impl HistoryLog {
    /// Create a log seeded with the initial (blank-surface) snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_depth: None,
        }
    }

    /// Create a log that keeps at most `max_depth` snapshots, evicting the
    /// oldest entry when full. The default is unbounded.
    pub fn with_max_depth(initial: Snapshot, max_depth: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_depth: Some(max_depth.max(1)),
        }
    }

    /// Append a snapshot: truncate to `0..=cursor`, push, move the cursor to
    /// the new end.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        if let Some(max) = self.max_depth {
            if self.entries.len() > max {
                self.entries.remove(0);
            }
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step the cursor back one entry. Returns the snapshot to display, or
    /// `None` if already at the oldest entry (a normal boundary, not an
    /// error).
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step the cursor forward one entry. Returns the snapshot to display,
    /// or `None` if already at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// The snapshot at the cursor (what the surface currently shows once
    /// restored).
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(value: u8) -> Snapshot {
        let mut surface = RasterSurface::new(2, 2, Rgba::white());
        surface.set_pixel(0, 0, Rgba::new(value, value, value, 255));
        Snapshot::of_surface(&surface)
    }

    #[test]
    fn test_new_log_has_initial_entry() {
        let log = HistoryLog::new(snap(0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.cursor(), 0);
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut log = HistoryLog::new(snap(0));
        log.push(snap(1));
        log.push(snap(2));
        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 2);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut log = HistoryLog::new(snap(0));
        log.push(snap(1));
        log.push(snap(2));

        assert_eq!(log.undo().unwrap(), &snap(1));
        assert_eq!(log.undo().unwrap(), &snap(0));
        assert!(log.undo().is_none());

        assert_eq!(log.redo().unwrap(), &snap(1));
        assert_eq!(log.redo().unwrap(), &snap(2));
        assert!(log.redo().is_none());
    }

    #[test]
    fn test_push_truncates_redo_tail() {
        let mut log = HistoryLog::new(snap(0));
        log.push(snap(1));
        log.push(snap(2));

        log.undo();
        log.undo();
        assert_eq!(log.cursor(), 0);

        log.push(snap(3));
        assert_eq!(log.len(), 2);
        assert_eq!(log.cursor(), 1);
        assert!(log.redo().is_none());
        assert_eq!(log.current(), &snap(3));
    }

    #[test]
    fn test_max_depth_evicts_oldest() {
        let mut log = HistoryLog::with_max_depth(snap(0), 3);
        log.push(snap(1));
        log.push(snap(2));
        log.push(snap(3));
        assert_eq!(log.len(), 3);
        assert_eq!(log.cursor(), 2);
        // Oldest entry (the blank initial snapshot) was evicted
        log.undo();
        log.undo();
        assert_eq!(log.current(), &snap(1));
        assert!(log.undo().is_none());
    }

    #[test]
    fn test_snapshot_restore_dimension_mismatch() {
        let snapshot = snap(1);
        let mut other = RasterSurface::new(3, 3, Rgba::white());
        assert!(!snapshot.restore_to(&mut other));
    }

    #[test]
    fn test_from_pixels_size_check() {
        assert!(Snapshot::from_pixels(2, 2, vec![Rgba::white(); 4]).is_some());
        assert!(Snapshot::from_pixels(2, 2, vec![Rgba::white(); 3]).is_none());
    }
}
