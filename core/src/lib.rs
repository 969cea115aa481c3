//! screenlate-core
//!
//! Region segmentation and overlay layout engine: turns word-level
//! recognition results into coherent text blocks, and translated block
//! texts into adaptively sized, non-overlapping, screen-bounded render
//! boxes. Capture, OCR and translation backends plug in through the
//! collaborator traits; presentation lives in `screenlate-overlay`.

pub mod config;
pub mod controls;
pub mod geometry;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod recognition;
pub mod segment;
pub mod translate;

// Re-exports for convenience
pub use config::{CycleConfig, EngineConfig, FilterConfig, SegmenterConfig};
pub use controls::{CaptureMode, Controls};
pub use geometry::Rect;
pub use layout::{LayoutConfig, LayoutSolver, PlacedBox, SizeHint};
pub use normalize::{CaptureGeometry, VerticalOrigin};
pub use pipeline::{CycleOutcome, Pipeline};
pub use recognition::{
    FrameSource, RecognitionError, RecognizedFrame, Recognizer, Word, filter_words,
};
pub use segment::{Block, segment_words};
pub use translate::{
    BatchTranslator, ERROR_MARKER, HttpBackend, HttpTranslator, TranslateBackend, TranslateError,
    TranslationConfig, Translator,
};
