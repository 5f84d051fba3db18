//! Headless text rendering: the demo's render output and its measurer.
//!
//! Glyph advance is approximated as `0.6 × font_size` per terminal column
//! (`unicode-width` decides how many columns a string takes, so CJK and
//! emoji count double).

use lazygrid::{IntSize, LayoutConstraints, Measurer};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// A block of text lines, the demo's opaque render output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub padding: i32,
    /// Wrap lines to the available width instead of overflowing.
    pub soft_wrap: bool,
}

impl TextBlock {
    /// Single unwrapped line, as used for headers and cells.
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            font_size: 16.0,
            padding: 10,
            soft_wrap: false,
        }
    }

    /// Wrapping paragraph block, as used for decorations.
    pub fn paragraph(lines: Vec<String>) -> Self {
        Self {
            lines,
            font_size: 14.0,
            padding: 10,
            soft_wrap: true,
        }
    }

    /// First line, for log output.
    pub fn title(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }
}

/// Measures [`TextBlock`]s with fixed-advance glyphs.
#[derive(Debug, Default)]
pub struct TextMeasurer {
    pub measured: usize,
}

impl TextMeasurer {
    fn char_width(font_size: f32) -> f32 {
        font_size * 0.6
    }

    fn line_height(font_size: f32) -> f32 {
        (font_size * 1.25).ceil()
    }
}

impl Measurer<TextBlock> for TextMeasurer {
    fn measure(&mut self, node: &TextBlock, constraints: LayoutConstraints) -> Option<IntSize> {
        self.measured += 1;
        let char_width = Self::char_width(node.font_size);
        let padding = node.padding as f32 * 2.0;
        let available = if node.soft_wrap && constraints.has_bounded_width() {
            Some((constraints.max_width - padding).max(char_width))
        } else {
            None
        };

        let mut widest = 0.0f32;
        let mut visual_lines = 0usize;
        for line in &node.lines {
            let width = UnicodeWidthStr::width(line.as_str()) as f32 * char_width;
            match available {
                Some(available) if width > available => {
                    visual_lines += (width / available).ceil() as usize;
                    widest = widest.max(available);
                }
                _ => {
                    visual_lines += 1;
                    widest = widest.max(width);
                }
            }
        }

        let size = IntSize::new(
            (widest + padding).ceil() as i32,
            (visual_lines as f32 * Self::line_height(node.font_size) + padding).ceil() as i32,
        );
        Some(constraints.constrain_int(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_counts_columns() {
        let mut measurer = TextMeasurer::default();
        let ascii = measurer
            .measure(&TextBlock::label("abcd"), LayoutConstraints::UNBOUNDED)
            .expect("size");
        let wide = measurer
            .measure(&TextBlock::label("表格"), LayoutConstraints::UNBOUNDED)
            .expect("size");
        assert_eq!(ascii.width, wide.width);
        assert_eq!(measurer.measured, 2);
    }

    #[test]
    fn paragraph_wraps_to_viewport() {
        let mut measurer = TextMeasurer::default();
        let block = TextBlock::paragraph(vec!["x".repeat(150)]);
        let constraints = LayoutConstraints::loose(300.0, 800.0).with_unbounded_height();
        let size = measurer.measure(&block, constraints).expect("size");
        assert!(size.width <= 300);
        // 150 columns at 8.4px over 280px: 5 visual lines of 18px
        assert_eq!(size.height, 5 * 18 + 20);
    }
}
