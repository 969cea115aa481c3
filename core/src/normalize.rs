//! Coordinate normalization from capture-pixel space to logical
//! screen space.
//!
//! Two independent corrections, both chosen once per run by the
//! capture method in use: a uniform scale (device pixel ratio of the
//! backing store) and an optional vertical-axis flip for display
//! surfaces whose origin is bottom-left.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::segment::Block;

/// Vertical-axis convention of the display surface relative to the
/// capture (captures are always top-left, y-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalOrigin {
    /// Display origin matches the capture: top-left, y grows down.
    #[default]
    TopDown,
    /// Display origin is bottom-left, y grows up; tops are flipped.
    BottomUp,
}

/// Per-run capture geometry. `scale` converts capture pixels to
/// logical screen points, e.g. 0.5 for a 2x backing-store capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureGeometry {
    pub scale: f32,
    pub vertical_origin: VerticalOrigin,
}

impl Default for CaptureGeometry {
    fn default() -> Self {
        Self {
            scale: 1.0,
            vertical_origin: VerticalOrigin::TopDown,
        }
    }
}

impl CaptureGeometry {
    /// Map one capture-space rectangle into screen space.
    pub fn to_screen(&self, rect: &Rect, screen_height: f32) -> Rect {
        let mut out = Rect::new(
            rect.left * self.scale,
            rect.top * self.scale,
            rect.width * self.scale,
            rect.height * self.scale,
        );
        if self.vertical_origin == VerticalOrigin::BottomUp {
            out.top = screen_height - out.top - out.height;
        }
        out
    }

    /// Rescale every block's bounds in place. Block order is kept as
    /// produced by segmentation even when the flip reverses tops.
    pub fn normalize_blocks(&self, blocks: &mut [Block], screen_height: f32) {
        for block in blocks {
            block.bounds = self.to_screen(&block.bounds, screen_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_geometry_leaves_rects_untouched() {
        let geometry = CaptureGeometry::default();
        let rect = Rect::new(100.0, 50.0, 200.0, 30.0);
        assert_eq!(geometry.to_screen(&rect, 1080.0), rect);
    }

    #[test]
    fn scale_applies_to_all_four_components() {
        let geometry = CaptureGeometry {
            scale: 0.5,
            vertical_origin: VerticalOrigin::TopDown,
        };
        let rect = Rect::new(100.0, 50.0, 200.0, 30.0);
        assert_eq!(
            geometry.to_screen(&rect, 1080.0),
            Rect::new(50.0, 25.0, 100.0, 15.0)
        );
    }

    #[test]
    fn bottom_up_flip_mirrors_top_coordinate() {
        let geometry = CaptureGeometry {
            scale: 1.0,
            vertical_origin: VerticalOrigin::BottomUp,
        };
        let rect = Rect::new(10.0, 100.0, 50.0, 20.0);
        let out = geometry.to_screen(&rect, 1080.0);
        assert_eq!(out.top, 1080.0 - 100.0 - 20.0);
        assert_eq!(out.left, 10.0);
        assert_eq!(out.height, 20.0);
    }

    #[test]
    fn scale_applies_before_flip() {
        let geometry = CaptureGeometry {
            scale: 0.5,
            vertical_origin: VerticalOrigin::BottomUp,
        };
        let rect = Rect::new(0.0, 200.0, 40.0, 40.0);
        let out = geometry.to_screen(&rect, 1080.0);
        // 200 * 0.5 = 100, flipped: 1080 - 100 - 20
        assert_eq!(out.top, 960.0);
        assert_eq!(out.height, 20.0);
    }
}
