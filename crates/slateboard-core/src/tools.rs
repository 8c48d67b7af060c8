//! Tool selection and drawing style.

use crate::engine::StrokeStyle;
use crate::surface::Rgba;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Freehand,
    Rectangle,
    Ellipse,
    Text,
    Eraser,
    Move,
}

/// Default color swatches offered in the toolbar.
pub const PALETTE: [Rgba; 12] = [
    Rgba::new(0x3b, 0x82, 0xf6, 255),
    Rgba::new(0x10, 0xb9, 0x81, 255),
    Rgba::new(0xf5, 0x9e, 0x0b, 255),
    Rgba::new(0xef, 0x44, 0x44, 255),
    Rgba::new(0x8b, 0x5c, 0xf6, 255),
    Rgba::new(0x06, 0xb6, 0xd4, 255),
    Rgba::new(0x84, 0xcc, 0x16, 255),
    Rgba::new(0xf9, 0x73, 0x16, 255),
    Rgba::new(0xec, 0x48, 0x99, 255),
    Rgba::new(0x6b, 0x72, 0x80, 255),
    Rgba::white(),
    Rgba::black(),
];

/// Brush sizes offered in the toolbar, in pixels.
pub const BRUSH_SIZES: [f64; 7] = [1.0, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0];

/// Style applied to new strokes and shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStyle {
    pub color: Rgba,
    pub width: f64,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            color: PALETTE[0],
            width: BRUSH_SIZES[2],
        }
    }
}

/// Manages the current tool and its style.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub style: ToolStyle,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// Whether the current tool drives the stroke lifecycle
    /// (begin/extend/commit) rather than a discrete edit.
    pub fn is_stroke_tool(&self) -> bool {
        matches!(self.current_tool, ToolKind::Freehand | ToolKind::Eraser)
    }

    /// Stroke style for the current tool, or `None` for tools that do not
    /// paint strokes.
    pub fn stroke_style(&self) -> Option<StrokeStyle> {
        match self.current_tool {
            ToolKind::Freehand => Some(StrokeStyle::paint(self.style.color, self.style.width)),
            // The eraser uses a wider brush so corrections feel responsive.
            ToolKind::Eraser => Some(StrokeStyle::erase(self.style.width.max(BRUSH_SIZES[2]))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::BlendMode;

    #[test]
    fn test_default_tool_is_freehand() {
        let tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Freehand);
        assert_eq!(tm.style.color, PALETTE[0]);
    }

    #[test]
    fn test_default_width_is_a_toolbar_size() {
        let style = ToolStyle::default();
        assert!(BRUSH_SIZES.contains(&style.width));
        assert_eq!(style.width, BRUSH_SIZES[2]);
    }

    #[test]
    fn test_eraser_never_narrower_than_default_brush() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Eraser);
        tm.style.width = BRUSH_SIZES[0];
        assert_eq!(tm.stroke_style().unwrap().width, BRUSH_SIZES[2]);
    }

    #[test]
    fn test_set_tool() {
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Eraser);
        assert_eq!(tm.current_tool, ToolKind::Eraser);
        assert!(tm.is_stroke_tool());

        tm.set_tool(ToolKind::Rectangle);
        assert!(!tm.is_stroke_tool());
    }

    #[test]
    fn test_stroke_style_per_tool() {
        let mut tm = ToolManager::new();
        let style = tm.stroke_style().unwrap();
        assert_eq!(style.mode, BlendMode::Paint);
        assert_eq!(style.color, tm.style.color);

        tm.set_tool(ToolKind::Eraser);
        assert_eq!(tm.stroke_style().unwrap().mode, BlendMode::Erase);

        tm.set_tool(ToolKind::Text);
        assert!(tm.stroke_style().is_none());
    }
}
