//! screenlate-overlay
//!
//! Presentation side of the translation overlay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     service                          │
//! │   producer loop: capture → recognize → pipeline      │
//! │         apply loop: updates → manager                │
//! ├──────────────────────────────────────────────────────┤
//! │                     mailbox                          │
//! │       single-slot producer → UI update channel       │
//! ├──────────────────────────────────────────────────────┤
//! │                     manager                          │
//! │      OverlaySetManager (atomic whole-set swap)       │
//! ├──────────────────────────────────────────────────────┤
//! │                     surface                          │
//! │    SurfaceFactory / BoxSurface (host windowing)      │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod mailbox;
pub mod manager;
pub mod service;
pub mod surface;

// Re-export commonly used types
pub use mailbox::{OverlayUpdate, UpdateReceiver, UpdateSender, update_channel};
pub use manager::OverlaySetManager;
pub use service::{CaptureService, run_apply_loop};
pub use surface::{BoxSurface, SurfaceError, SurfaceFactory};
