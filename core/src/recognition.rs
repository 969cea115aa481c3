//! Recognition collaborator boundary and word filtering.
//!
//! Capture and OCR are external services; this module defines the
//! traits they plug into and the first pipeline stage that discards
//! unusable recognition results.

use thiserror::Error;

use crate::geometry::Rect;

/// A single recognized token: text, bounding box in source-image pixel
/// space, and a 0-100 confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bounds: Rect,
    pub confidence: f32,
}

impl Word {
    pub fn new(text: impl Into<String>, bounds: Rect, confidence: f32) -> Self {
        Self {
            text: text.into(),
            bounds,
            confidence,
        }
    }
}

/// One frame's worth of recognition output: the word records plus the
/// source image's pixel dimensions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognizedFrame {
    pub words: Vec<Word>,
    pub image_width: f32,
    pub image_height: f32,
}

/// Errors from the capture/recognition collaborators. Both are
/// non-fatal: a failed cycle is skipped and retried after the normal
/// inter-cycle delay.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no frame available from the capture source")]
    NoFrame,

    #[error("capture source failed")]
    Acquire(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("recognition backend failed")]
    Recognize(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Supplies raw frames to the producer loop. Typically a screen grab
/// or camera read; blocking on the next frame is expected.
pub trait FrameSource {
    type Frame;

    fn acquire(
        &mut self,
    ) -> impl Future<Output = Result<Self::Frame, RecognitionError>> + Send;
}

/// Converts a frame into per-word text/box/confidence records.
pub trait Recognizer<F> {
    fn recognize(
        &mut self,
        frame: &F,
    ) -> impl Future<Output = Result<RecognizedFrame, RecognitionError>> + Send;
}

/// Drop words whose trimmed text is empty or whose confidence is at or
/// below `min_confidence`. Pure and order-preserving.
pub fn filter_words(words: Vec<Word>, min_confidence: f32) -> Vec<Word> {
    words
        .into_iter()
        .filter(|w| !w.text.trim().is_empty() && w.confidence > min_confidence)
        .collect()
}
