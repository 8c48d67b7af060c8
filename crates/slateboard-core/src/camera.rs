//! Viewport camera for pan/zoom transforms.
//!
//! Coordinate mapping only: the engine always operates in surface-local
//! pixel coordinates, so the host maps pointer positions through the camera
//! before handing them to the engine.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.3;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.2;

/// Camera managing the view transform for the whiteboard surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current pan offset in surface coordinates.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform converting surface coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.offset)
    }

    /// Inverse transform for input handling (screen to surface).
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.offset) * Affine::scale(1.0 / self.zoom)
    }

    /// Convert a screen point to surface-local coordinates.
    pub fn screen_to_surface(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a surface point to screen coordinates.
    pub fn surface_to_screen(&self, surface_point: Point) -> Point {
        self.transform() * surface_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta / self.zoom;
    }

    /// Zoom in one step. Returns the new zoom level.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    /// Zoom out one step. Returns the new zoom level.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    /// Set the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom
    }

    /// Reset to the default position and zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let camera = Camera::new();
        let p = Point::new(100.0, 200.0);
        let mapped = camera.screen_to_surface(p);
        assert!((mapped.x - p.x).abs() < f64::EPSILON);
        assert!((mapped.y - p.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_surface_with_zoom_and_pan() {
        let mut camera = Camera::new();
        camera.set_zoom(2.0);
        camera.offset = Vec2::new(10.0, 20.0);

        // surface = screen / zoom - offset
        let mapped = camera.screen_to_surface(Point::new(100.0, 200.0));
        assert!((mapped.x - 40.0).abs() < 1e-9);
        assert!((mapped.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip() {
        let mut camera = Camera::new();
        camera.set_zoom(1.4);
        camera.offset = Vec2::new(-15.0, 33.0);

        let original = Point::new(123.0, 456.0);
        let back = camera.surface_to_screen(camera.screen_to_surface(original));
        assert!((back.x - original.x).abs() < 1e-9);
        assert!((back.y - original.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        for _ in 0..50 {
            camera.zoom_in();
        }
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);

        for _ in 0..50 {
            camera.zoom_out();
        }
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_scales_with_zoom() {
        let mut camera = Camera::new();
        camera.set_zoom(2.0);
        camera.pan(Vec2::new(10.0, 0.0));
        assert!((camera.offset.x - 5.0).abs() < f64::EPSILON);
    }
}
