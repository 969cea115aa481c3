//! Region segmentation: grouping recognized words into coherent text
//! blocks.
//!
//! Uses a threshold sweep: words are sorted by (top, left) and walked
//! in order; a new block starts whenever the vertical gap between a
//! word's top and the current block's max bottom exceeds a fixed
//! threshold. One pass after the sort, and the resulting blocks come
//! out in reading order by construction.

use crate::geometry::Rect;
use crate::recognition::Word;

/// A merged group of words representing one line or short paragraph.
/// The unit that gets translated and laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Constituent word texts joined by single spaces, reading order.
    pub text: String,
    /// Minimal axis-aligned box covering all constituent words.
    pub bounds: Rect,
}

/// Group filtered words into blocks. Every input word lands in exactly
/// one block; blocks are returned in ascending order of their top
/// coordinate. Empty input yields no blocks.
pub fn segment_words(mut words: Vec<Word>, vertical_gap: f32) -> Vec<Block> {
    if words.is_empty() {
        return Vec::new();
    }

    words.sort_by(|a, b| {
        a.bounds
            .top
            .total_cmp(&b.bounds.top)
            .then(a.bounds.left.total_cmp(&b.bounds.left))
    });

    let mut blocks = Vec::new();
    let mut group: Vec<Word> = Vec::new();
    let mut group_bottom = f32::NEG_INFINITY;

    for word in words {
        if !group.is_empty() && word.bounds.top - group_bottom > vertical_gap {
            blocks.push(merge_group(std::mem::take(&mut group)));
            group_bottom = f32::NEG_INFINITY;
        }
        group_bottom = group_bottom.max(word.bounds.bottom());
        group.push(word);
    }
    if !group.is_empty() {
        blocks.push(merge_group(group));
    }

    blocks
}

fn merge_group(words: Vec<Word>) -> Block {
    let mut bounds = words[0].bounds;
    let mut text = String::new();
    for word in &words {
        bounds = bounds.union(&word.bounds);
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    Block { text, bounds }
}
