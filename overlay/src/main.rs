//! Demo binary running the full service against canned recognition
//! data. In production the frame source and recognizer would wrap a
//! real screen grab and OCR engine, and the surface factory a real
//! overlay window backend; here they log what they would display.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use screenlate_core::{
    Controls, EngineConfig, Pipeline, RecognitionError, RecognizedFrame, Rect, Translator, Word,
};
use screenlate_overlay::{
    BoxSurface, CaptureService, OverlaySetManager, SurfaceError, SurfaceFactory, run_apply_loop,
    update_channel,
};

/// Cycles through a fixed set of frames, then reports no frame.
struct CannedFrames {
    frames: Vec<RecognizedFrame>,
    next: usize,
}

impl screenlate_core::FrameSource for CannedFrames {
    type Frame = RecognizedFrame;

    async fn acquire(&mut self) -> Result<RecognizedFrame, RecognitionError> {
        let frame = self.frames.get(self.next).ok_or(RecognitionError::NoFrame)?;
        self.next += 1;
        Ok(frame.clone())
    }
}

/// The frames already carry word records; recognition is a pass-through.
struct PreRecognized;

impl screenlate_core::Recognizer<RecognizedFrame> for PreRecognized {
    async fn recognize(
        &mut self,
        frame: &RecognizedFrame,
    ) -> Result<RecognizedFrame, RecognitionError> {
        Ok(frame.clone())
    }
}

/// Stands in for the HTTP backend so the demo runs offline.
struct MockTranslator;

impl Translator for MockTranslator {
    async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|t| format!("«{t}»")).collect()
    }
}

struct LoggedSurface {
    text: String,
}

impl BoxSurface for LoggedSurface {
    fn show(&mut self) {
        tracing::info!(text = %self.text, "surface shown");
    }

    fn hide(&mut self) {
        tracing::info!(text = %self.text, "surface hidden");
    }
}

struct LoggedFactory;

impl SurfaceFactory for LoggedFactory {
    type Surface = LoggedSurface;

    fn screen_size(&self) -> (f32, f32) {
        (1920.0, 1080.0)
    }

    fn create(&mut self, placed: &screenlate_core::PlacedBox) -> Result<LoggedSurface, SurfaceError> {
        tracing::info!(
            left = placed.rect.left,
            top = placed.rect.top,
            width = placed.rect.width,
            height = placed.rect.height,
            font_size = placed.font_size,
            lines = placed.lines.len(),
            text = %placed.text,
            "surface created"
        );
        Ok(LoggedSurface {
            text: placed.text.clone(),
        })
    }
}

fn word(text: &str, left: f32, top: f32) -> Word {
    let width = text.len() as f32 * 14.0;
    Word::new(text, Rect::new(left, top, width, 24.0), 92.0)
}

fn sample_frames() -> Vec<RecognizedFrame> {
    let menu = RecognizedFrame {
        words: vec![
            word("Press", 120.0, 80.0),
            word("any", 210.0, 80.0),
            word("key", 275.0, 80.0),
            word("Options", 120.0, 320.0),
            word("Quit", 120.0, 390.0),
        ],
        image_width: 1920.0,
        image_height: 1080.0,
    };
    let dialog = RecognizedFrame {
        words: vec![
            word("Are", 600.0, 400.0),
            word("you", 670.0, 400.0),
            word("sure?", 740.0, 400.0),
        ],
        image_width: 1920.0,
        image_height: 1080.0,
    };
    vec![menu, dialog]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = EngineConfig::load();
    config.cycle.debounce_ms = 500;

    let (tx, rx) = update_channel();
    let manager = Arc::new(OverlaySetManager::new(LoggedFactory));
    let controls = Arc::new(Controls::new());

    let service = CaptureService::new(
        CannedFrames {
            frames: sample_frames(),
            next: 0,
        },
        PreRecognized,
        Pipeline::new(config, MockTranslator),
        Arc::clone(&manager),
        tx,
        Arc::clone(&controls),
    );

    let apply = tokio::spawn(run_apply_loop(Arc::clone(&manager), rx));
    let producer = tokio::spawn(service.run());

    tokio::time::sleep(Duration::from_secs(3)).await;

    for placed in manager.boxes() {
        tracing::info!(
            left = placed.rect.left,
            top = placed.rect.top,
            font_size = placed.font_size,
            text = %placed.text,
            "final overlay box"
        );
    }

    producer.abort();
    drop(apply);
}
