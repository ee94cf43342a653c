//! Container size and pointer normalization

use serde::{Deserialize, Serialize};

/// Size of the element the cover is rendered into, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Nothing can be drawn into a container that is empty on either axis
    pub fn is_renderable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Scale down, keeping the aspect ratio, until neither side exceeds
    /// `max_dimension`. Sizes that already fit are returned unchanged.
    pub fn fit_within(&self, max_dimension: u32) -> Viewport {
        let longest = self.width.max(self.height);
        if longest <= max_dimension || max_dimension == 0 {
            return *self;
        }

        let scale = max_dimension as f64 / longest as f64;
        let shrink = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
        Viewport::new(shrink(self.width), shrink(self.height))
    }

    /// Map container-relative pixels to `[-1, 1]` on both axes, +y up
    pub fn normalize(&self, x: f32, y: f32) -> (f32, f32) {
        let width = self.width.max(1) as f32;
        let height = self.height.max(1) as f32;
        let nx = (x / width) * 2.0 - 1.0;
        let ny = -((y / height) * 2.0 - 1.0);
        (nx.clamp(-1.0, 1.0), ny.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_corners_and_centre() {
        let viewport = Viewport::new(400, 600);
        assert_eq!(viewport.normalize(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(viewport.normalize(400.0, 600.0), (1.0, -1.0));
        assert_eq!(viewport.normalize(200.0, 300.0), (0.0, 0.0));
        assert_eq!(viewport.normalize(300.0, 150.0), (0.5, 0.5));
    }

    #[test]
    fn clamps_outside_pointer() {
        let viewport = Viewport::new(400, 600);
        assert_eq!(viewport.normalize(-50.0, 900.0), (-1.0, -1.0));
    }

    #[test]
    fn oversized_viewport_fits_device_limit() {
        let fitted = Viewport::new(20000, 600).fit_within(8192);
        assert_eq!(fitted, Viewport::new(8192, 246));
        assert!(fitted.is_renderable());

        assert_eq!(Viewport::new(400, 600).fit_within(8192), Viewport::new(400, 600));
        assert_eq!(Viewport::new(8192, 8192).fit_within(8192), Viewport::new(8192, 8192));
        assert_eq!(Viewport::new(100000, 1).fit_within(2048), Viewport::new(2048, 1));
    }

    #[test]
    fn renderability_and_aspect() {
        assert!(Viewport::new(400, 600).is_renderable());
        assert!(!Viewport::new(0, 600).is_renderable());
        assert!(!Viewport::new(400, 0).is_renderable());
        assert!((Viewport::new(400, 600).aspect_ratio() - 400.0 / 600.0).abs() < 1e-6);
    }
}
