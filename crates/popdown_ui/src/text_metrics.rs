//! Size estimation for element descriptors.
//!
//! Nothing here shapes real glyphs: widths come from an average character
//! width, which is enough for placement and hit testing without a renderer.

use crate::element::Element;
use crate::geometry::Size;

/// Metrics for a specific font/size combination.
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    /// Font size in pixels
    pub size: f32,
    /// Average character width as a ratio of font size
    pub char_width_ratio: f32,
    /// Line height as a ratio of font size
    pub line_height_ratio: f32,
    /// Horizontal padding added around text content
    pub padding_x: f32,
}

impl TextMetrics {
    /// Monospace metrics at 14px.
    pub const MONO: TextMetrics = TextMetrics {
        size: 14.0,
        char_width_ratio: 0.6,
        line_height_ratio: 1.5,
        padding_x: 8.0,
    };

    /// Create metrics for a specific font size.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::MONO
        }
    }

    /// Estimate the width of a single line of text.
    pub fn line_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.char_width_ratio
    }

    pub fn line_height(&self) -> f32 {
        self.size * self.line_height_ratio
    }

    /// Estimate dimensions for multi-line text.
    pub fn measure(&self, text: &str) -> Size {
        let line_count = text.lines().count().max(1);
        let width = text
            .lines()
            .map(|line| self.line_width(line))
            .fold(0.0f32, f32::max);
        Size::new(width, line_count as f32 * self.line_height())
    }

    /// Estimate the border-box size of an element tree.
    ///
    /// Explicit `width`/`height` styles win; otherwise text is measured and
    /// children are stacked vertically. `min_width` is applied last.
    pub fn measure_element<M>(&self, element: &Element<M>) -> Size {
        let style = &element.props().style;

        let mut content = match element.text_content() {
            Some(text) => {
                let text_size = self.measure(text);
                Size::new(text_size.width + self.padding_x * 2.0, text_size.height)
            }
            None => Size::zero(),
        };
        for child in element.child_elements() {
            let child_size = self.measure_element(child);
            content.width = content.width.max(child_size.width);
            content.height += child_size.height;
        }

        let width = style.width.unwrap_or(content.width);
        let height = style.height.unwrap_or(content.height);
        let width = style.min_width.map_or(width, |min| width.max(min));
        let height = style.max_height.map_or(height, |max| height.min(max));
        Size::new(width, height)
    }
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self::MONO
    }
}
