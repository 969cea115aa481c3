//! Presentation collaborator boundary.
//!
//! The host windowing system creates and composites the actual
//! on-screen boxes; this crate only drives it through these traits.
//! A surface's visual resources are released when it is dropped.

use thiserror::Error;

use screenlate_core::PlacedBox;

/// Errors materializing a single overlay box. Never fatal for the
/// cycle: the failed box is skipped and the rest are placed.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("window creation failed: {0}")]
    Creation(String),

    #[error("display connection lost")]
    Disconnected,
}

/// One visible overlay box.
pub trait BoxSurface {
    fn show(&mut self);
    fn hide(&mut self);
}

/// Creates overlay box surfaces and reports the logical screen size.
pub trait SurfaceFactory {
    type Surface: BoxSurface;

    /// Logical width/height of the primary display.
    fn screen_size(&self) -> (f32, f32);

    /// Materialize one box. The surface starts hidden; the caller
    /// decides visibility.
    fn create(&mut self, placed: &PlacedBox) -> Result<Self::Surface, SurfaceError>;
}
