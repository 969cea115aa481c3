//! Capture service: the producer loop and the UI-side apply loop.
//!
//! The producer blanks the overlay, grabs a frame, restores
//! visibility, runs the frame through the core pipeline and hands the
//! resulting overlay set to the apply loop through the single-slot
//! update channel. Every failure is contained to its own cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use screenlate_core::{
    CaptureMode, Controls, CycleOutcome, FrameSource, Pipeline, Recognizer, Translator,
};

use crate::mailbox::{OverlayUpdate, UpdateReceiver, UpdateSender};
use crate::manager::OverlaySetManager;
use crate::surface::SurfaceFactory;

/// The producer half. Runs until the UI side hangs up.
pub struct CaptureService<S, R, T, F>
where
    S: FrameSource,
    R: Recognizer<S::Frame>,
    T: Translator,
    F: SurfaceFactory,
{
    source: S,
    recognizer: R,
    pipeline: Pipeline<T>,
    manager: Arc<OverlaySetManager<F>>,
    updates: UpdateSender,
    controls: Arc<Controls>,
}

impl<S, R, T, F> CaptureService<S, R, T, F>
where
    S: FrameSource,
    R: Recognizer<S::Frame>,
    T: Translator,
    F: SurfaceFactory,
{
    pub fn new(
        source: S,
        recognizer: R,
        pipeline: Pipeline<T>,
        manager: Arc<OverlaySetManager<F>>,
        updates: UpdateSender,
        controls: Arc<Controls>,
    ) -> Self {
        Self {
            source,
            recognizer,
            pipeline,
            manager,
            updates,
            controls,
        }
    }

    /// Producer loop. One cycle per debounce interval; paused cycles
    /// are skipped without touching the visible overlay.
    pub async fn run(mut self) {
        let debounce = Duration::from_millis(self.pipeline.config().cycle.debounce_ms);
        loop {
            if !self.controls.is_paused() {
                if !self.run_cycle().await {
                    break;
                }
                if self.controls.mode() == CaptureMode::SingleShot {
                    self.controls.set_paused(true);
                }
            }
            sleep(debounce).await;
        }
        tracing::info!("capture service stopped");
    }

    /// One capture cycle. Returns false when the update channel is
    /// closed and the service should stop.
    async fn run_cycle(&mut self) -> bool {
        // Blank the overlay so the capture doesn't include it.
        if !self.updates.send(OverlayUpdate::HideAll).await {
            return false;
        }
        sleep(Duration::from_millis(self.pipeline.config().cycle.blank_ms)).await;

        let frame = self.source.acquire().await;

        if !self.updates.send(OverlayUpdate::ShowAll).await {
            return false;
        }

        let frame = match frame {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%error, "skipping cycle: no frame");
                return true;
            }
        };

        let recognized = match self.recognizer.recognize(&frame).await {
            Ok(recognized) => recognized,
            Err(error) => {
                tracing::warn!(%error, "skipping cycle: recognition failed");
                return true;
            }
        };

        let (screen_width, screen_height) = self.manager.screen_size();
        match self
            .pipeline
            .run_cycle(recognized, screen_width, screen_height)
            .await
        {
            CycleOutcome::Updated(boxes) => self.updates.send(OverlayUpdate::Replace(boxes)).await,
            CycleOutcome::Unchanged | CycleOutcome::NoText => true,
        }
    }
}

/// UI-side loop: applies updates one at a time, in the order they were
/// computed. Run this on the thread that owns the presentation
/// surfaces; it ends when every sender is gone.
pub async fn run_apply_loop<F: SurfaceFactory>(
    manager: Arc<OverlaySetManager<F>>,
    mut updates: UpdateReceiver,
) {
    while let Some(update) = updates.recv().await {
        match update {
            OverlayUpdate::Replace(boxes) => manager.replace_all(boxes),
            OverlayUpdate::HideAll => manager.hide_all(),
            OverlayUpdate::ShowAll => manager.show_all(),
        }
    }
    tracing::debug!("apply loop stopped");
}
