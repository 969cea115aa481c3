//! Per-cycle orchestration: filter → segment → normalize → translate
//! → layout.
//!
//! Each stage is pure apart from the translation round trip. The
//! pipeline also remembers the previous cycle's block texts and skips
//! translation and layout entirely when the screen content has not
//! changed.

use crate::config::EngineConfig;
use crate::layout::{LayoutSolver, PlacedBox};
use crate::recognition::{RecognizedFrame, filter_words};
use crate::segment::segment_words;
use crate::translate::Translator;

/// Result of running one capture cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A new overlay set was computed and should replace the old one.
    Updated(Vec<PlacedBox>),
    /// Same block texts as last cycle; the visible set stays put.
    Unchanged,
    /// Nothing recognized above the confidence threshold; no-op cycle.
    NoText,
}

/// Drives one frame through the whole pipeline.
pub struct Pipeline<T> {
    config: EngineConfig,
    translator: T,
    last_texts: Vec<String>,
}

impl<T: Translator> Pipeline<T> {
    pub fn new(config: EngineConfig, translator: T) -> Self {
        Self {
            config,
            translator,
            last_texts: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one cycle against the given logical screen size.
    pub async fn run_cycle(
        &mut self,
        frame: RecognizedFrame,
        screen_width: f32,
        screen_height: f32,
    ) -> CycleOutcome {
        let words = filter_words(frame.words, self.config.filter.min_confidence);
        if words.is_empty() {
            tracing::debug!("no words above confidence threshold");
            return CycleOutcome::NoText;
        }

        let mut blocks = segment_words(words, self.config.segmenter.vertical_gap);
        let texts: Vec<String> = blocks.iter().map(|b| b.text.clone()).collect();
        if texts == self.last_texts {
            tracing::debug!(blocks = blocks.len(), "screen text unchanged, skipping cycle");
            return CycleOutcome::Unchanged;
        }
        self.last_texts = texts.clone();

        self.config
            .capture
            .normalize_blocks(&mut blocks, screen_height);

        let translations = self.translator.translate_batch(&texts).await;
        tracing::info!(
            blocks = blocks.len(),
            translations = translations.len(),
            "translated cycle batch"
        );

        let solver = LayoutSolver::new(self.config.layout, screen_width, screen_height);
        let placed = solver.place_all(
            blocks
                .iter()
                .zip(translations.iter())
                .map(|(b, t)| (b, t.as_str())),
        );
        CycleOutcome::Updated(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::recognition::Word;
    use crate::translate::ERROR_MARKER;

    /// Echoes inputs with a prefix; fails nothing.
    struct EchoTranslator;

    impl Translator for EchoTranslator {
        async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
            texts.iter().map(|t| format!("~{t}")).collect()
        }
    }

    /// Degrades the second item, as a backend outage would.
    struct SecondItemFails;

    impl Translator for SecondItemFails {
        async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    if i == 1 {
                        ERROR_MARKER.to_string()
                    } else {
                        format!("~{t}")
                    }
                })
                .collect()
        }
    }

    fn word(text: &str, left: f32, top: f32) -> Word {
        Word::new(text, Rect::new(left, top, 50.0, 20.0), 95.0)
    }

    fn frame(words: Vec<Word>) -> RecognizedFrame {
        RecognizedFrame {
            words,
            image_width: 1920.0,
            image_height: 1080.0,
        }
    }

    #[tokio::test]
    async fn full_cycle_places_one_box_per_block() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), EchoTranslator);
        let outcome = pipeline
            .run_cycle(
                frame(vec![
                    word("Hello", 0.0, 0.0),
                    word("World", 60.0, 0.0),
                    word("Later", 0.0, 300.0),
                ]),
                1920.0,
                1080.0,
            )
            .await;
        let CycleOutcome::Updated(placed) = outcome else {
            panic!("expected an updated overlay set");
        };
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].text, "~Hello World");
        assert_eq!(placed[1].text, "~Later");
    }

    #[tokio::test]
    async fn empty_frame_is_a_no_op() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), EchoTranslator);
        let outcome = pipeline.run_cycle(frame(Vec::new()), 1920.0, 1080.0).await;
        assert_eq!(outcome, CycleOutcome::NoText);
    }

    #[tokio::test]
    async fn all_words_below_threshold_is_a_no_op() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), EchoTranslator);
        let mut w = word("faint", 0.0, 0.0);
        w.confidence = 30.0;
        let outcome = pipeline.run_cycle(frame(vec![w]), 1920.0, 1080.0).await;
        assert_eq!(outcome, CycleOutcome::NoText);
    }

    #[tokio::test]
    async fn repeated_screen_content_skips_the_cycle() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), EchoTranslator);
        let words = vec![word("Stable", 0.0, 0.0), word("text", 60.0, 0.0)];
        let first = pipeline
            .run_cycle(frame(words.clone()), 1920.0, 1080.0)
            .await;
        assert!(matches!(first, CycleOutcome::Updated(_)));
        let second = pipeline.run_cycle(frame(words), 1920.0, 1080.0).await;
        assert_eq!(second, CycleOutcome::Unchanged);
    }

    #[tokio::test]
    async fn changed_screen_content_recomputes() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), EchoTranslator);
        pipeline
            .run_cycle(frame(vec![word("before", 0.0, 0.0)]), 1920.0, 1080.0)
            .await;
        let outcome = pipeline
            .run_cycle(frame(vec![word("after", 0.0, 0.0)]), 1920.0, 1080.0)
            .await;
        assert!(matches!(outcome, CycleOutcome::Updated(_)));
    }

    #[tokio::test]
    async fn translation_failure_marks_only_the_failed_block() {
        let mut pipeline = Pipeline::new(EngineConfig::default(), SecondItemFails);
        let outcome = pipeline
            .run_cycle(
                frame(vec![word("A", 0.0, 0.0), word("B", 0.0, 300.0)]),
                1920.0,
                1080.0,
            )
            .await;
        let CycleOutcome::Updated(placed) = outcome else {
            panic!("expected an updated overlay set");
        };
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].text, "~A");
        assert_eq!(placed[1].text, ERROR_MARKER);
    }
}
