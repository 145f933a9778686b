//! Text measurement collaborator.
//!
//! Shaping and glyph rasterization live outside the toolkit. Layout only needs
//! to know how much room a string takes at a given wrap width.

use unicode_segmentation::UnicodeSegmentation;

use crate::PixelSize;

pub trait TextShaper {
    /// `wrap_width` of `None` lays the text out on as few lines as its
    /// explicit newlines allow.
    fn measure(&self, text: &str, wrap_width: Option<u32>) -> PixelSize;
}

/// Fixed-advance shaper: every grapheme is `advance` pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceShaper {
    pub advance: u32,
    pub line_height: u32,
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self {
            advance: 8,
            line_height: 16,
        }
    }
}

impl MonospaceShaper {
    pub fn new(advance: u32, line_height: u32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    /// Greedy word wrap on Unicode word boundaries.
    ///
    /// A single word wider than the wrap width keeps its own line and
    /// overflows rather than being split mid-word.
    pub fn wrap_lines(&self, text: &str, wrap_width: Option<u32>) -> Vec<String> {
        let max_cols = wrap_width.map(|w| (w / self.advance.max(1)).max(1) as usize);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let Some(max_cols) = max_cols else {
                lines.push(paragraph.to_string());
                continue;
            };
            let mut line = String::new();
            let mut cols = 0usize;
            for segment in paragraph.split_word_bounds() {
                let seg_cols = segment.graphemes(true).count();
                let is_space = segment.trim().is_empty();
                if cols + seg_cols > max_cols && cols > 0 {
                    lines.push(line.trim_end().to_string());
                    line.clear();
                    cols = 0;
                    if is_space {
                        continue;
                    }
                }
                line.push_str(segment);
                cols += seg_cols;
            }
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

impl TextShaper for MonospaceShaper {
    fn measure(&self, text: &str, wrap_width: Option<u32>) -> PixelSize {
        let lines = self.wrap_lines(text, wrap_width);
        let cols = lines
            .iter()
            .map(|l| l.graphemes(true).count())
            .max()
            .unwrap_or(0);
        PixelSize {
            width: cols as u32 * self.advance,
            height: lines.len() as u32 * self.line_height,
        }
    }
}
