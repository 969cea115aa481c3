//! Shared producer-loop controls.
//!
//! The pause flag and capture mode are toggled from outside the loop
//! (hotkey listener, UI) while the loop reads them each cycle, so they
//! live in one atomics-backed struct shared by `Arc` instead of loose
//! globals.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// How the producer loop schedules cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CaptureMode {
    /// Keep cycling with the configured debounce.
    #[default]
    Continuous = 0,
    /// Run one cycle, then pause until resumed.
    SingleShot = 1,
}

/// Cross-thread control state for the capture service.
#[derive(Debug, Default)]
pub struct Controls {
    paused: AtomicBool,
    mode: AtomicU8,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Flip the pause flag, returning the new state.
    pub fn toggle_paused(&self) -> bool {
        !self.paused.fetch_not(Ordering::SeqCst)
    }

    pub fn mode(&self) -> CaptureMode {
        match self.mode.load(Ordering::SeqCst) {
            1 => CaptureMode::SingleShot,
            _ => CaptureMode::Continuous,
        }
    }

    pub fn set_mode(&self, mode: CaptureMode) {
        self.mode.store(mode as u8, Ordering::SeqCst);
    }
}
