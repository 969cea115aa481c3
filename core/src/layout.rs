//! Layout solver: turns (block geometry, translated text) pairs into
//! adaptively sized, non-overlapping, screen-bounded render boxes.
//!
//! Text width is estimated as `charCount × fontSize × 0.6` rather than
//! measured from glyph metrics; a rendering backend with real text
//! measurement can substitute its own estimate without changing the
//! shrink-to-fit loop.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::segment::Block;

/// Where the target box for a translation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeHint {
    /// Target the source block's own rectangle; translations are
    /// expected to roughly match the source text's footprint.
    #[default]
    SourceBounds,
    /// No anchor size constraint; cap at a fraction of the screen and
    /// place the box just above the source text.
    ScreenFraction,
}

/// Layout tuning. All lengths in logical screen points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_font_size: f32,
    pub min_font_size: f32,
    /// Estimated glyph advance as a fraction of the font size.
    pub char_width_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
    /// Inner padding added to the box on each axis.
    pub padding: f32,
    /// How far above the source text an unconstrained box sits.
    pub anchor_offset: f32,
    /// Vertical step used to resolve overlaps.
    pub shift_step: f32,
    /// Clearance kept from every screen edge.
    pub screen_margin: f32,
    pub size_hint: SizeHint,
    /// Screen fraction used when `size_hint` is `ScreenFraction`.
    pub screen_fraction: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_font_size: 40.0,
            min_font_size: 10.0,
            char_width_ratio: 0.6,
            line_height_ratio: 1.5,
            padding: 20.0,
            anchor_offset: 40.0,
            shift_step: 50.0,
            screen_margin: 10.0,
            size_hint: SizeHint::SourceBounds,
            screen_fraction: 0.9,
        }
    }
}

/// A block's translation with its final render geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub rect: Rect,
    pub text: String,
    pub lines: Vec<String>,
    pub font_size: f32,
}

/// Places translated blocks one at a time, resolving overlaps against
/// everything already placed in the cycle. Deterministic for fixed
/// inputs and block order.
#[derive(Debug, Clone)]
pub struct LayoutSolver {
    config: LayoutConfig,
    screen_width: f32,
    screen_height: f32,
}

impl LayoutSolver {
    pub fn new(config: LayoutConfig, screen_width: f32, screen_height: f32) -> Self {
        Self {
            config,
            screen_width,
            screen_height,
        }
    }

    /// Lay out a whole cycle's blocks in sequence order.
    pub fn place_all<'a, I>(&self, pairs: I) -> Vec<PlacedBox>
    where
        I: IntoIterator<Item = (&'a Block, &'a str)>,
    {
        let mut placed: Vec<PlacedBox> = Vec::new();
        for (block, translation) in pairs {
            let next = self.place(block, translation, &placed);
            placed.push(next);
        }
        placed
    }

    /// Produce one box for a block, avoiding everything in `placed`.
    pub fn place(&self, block: &Block, translation: &str, placed: &[PlacedBox]) -> PlacedBox {
        let cfg = &self.config;
        let text = tidy_text(translation);

        let (target_width, target_height) = match cfg.size_hint {
            SizeHint::SourceBounds => (block.bounds.width, block.bounds.height),
            SizeHint::ScreenFraction => (
                self.screen_width * cfg.screen_fraction,
                self.screen_height * cfg.screen_fraction,
            ),
        };

        let (font_size, lines, width, height) = self.fit_text(&text, target_width, target_height);

        let mut rect = Rect::new(block.bounds.left, block.bounds.top, width, height);
        if cfg.size_hint == SizeHint::ScreenFraction {
            rect.top -= cfg.anchor_offset;
        }

        self.resolve_overlaps(&mut rect, placed);
        self.clamp_to_screen(&mut rect);

        PlacedBox {
            rect,
            text,
            lines,
            font_size,
        }
    }

    /// Search font sizes downward until the wrapped text fits the
    /// target box. Returns the minimum-size layout, overflow and all,
    /// when nothing in range fits.
    fn fit_text(&self, text: &str, target_width: f32, target_height: f32) -> (f32, Vec<String>, f32, f32) {
        let cfg = &self.config;
        let mut font_size = cfg.max_font_size;

        loop {
            let char_width = font_size * cfg.char_width_ratio;
            let lines = wrap_text(text, target_width - cfg.padding, char_width);
            let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            let width = (longest as f32 * char_width).min(target_width) + cfg.padding;
            let height = lines.len() as f32 * font_size * cfg.line_height_ratio + cfg.padding;

            if width <= target_width && height <= target_height {
                return (font_size, lines, width, height);
            }
            if font_size <= cfg.min_font_size {
                tracing::debug!(
                    font_size,
                    width,
                    height,
                    target_width,
                    target_height,
                    "text does not fit target box at minimum font size, accepting overflow"
                );
                return (font_size, lines, width, height);
            }
            font_size -= 1.0;
        }
    }

    /// Shift the rectangle downward in fixed steps until it clears
    /// every already-placed box, or the next step would leave the
    /// screen's bottom margin (residual overlap is accepted then).
    fn resolve_overlaps(&self, rect: &mut Rect, placed: &[PlacedBox]) {
        let bottom_limit = self.screen_height - self.config.screen_margin;
        while placed.iter().any(|p| rect.intersects(&p.rect)) {
            if rect.bottom() + self.config.shift_step > bottom_limit {
                break;
            }
            rect.top += self.config.shift_step;
        }
    }

    fn clamp_to_screen(&self, rect: &mut Rect) {
        let margin = self.config.screen_margin;
        let max_left = (self.screen_width - rect.width - margin).max(0.0);
        let max_top = (self.screen_height - rect.height - margin).max(0.0);
        rect.left = rect.left.clamp(0.0, max_left);
        rect.top = rect.top.clamp(0.0, max_top);
    }
}

/// Trim and collapse doubled blank lines; backends render the wrapped
/// `lines`, so embedded newlines only matter as word separators.
fn tidy_text(text: &str) -> String {
    text.trim().replace("\n\n", "\n")
}

/// Greedy word wrap against an estimated character width. Always
/// returns at least one line.
fn wrap_text(text: &str, max_width: f32, char_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let tentative_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if tentative_len as f32 * char_width <= max_width || current.is_empty() {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
