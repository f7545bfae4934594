// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where markers go.
//!
//! A marker lives in the "spacer" of its line: the strip of first line indentation in front of
//! the text. Markers are right aligned against the text and scaled down if they are taller than
//! the line.

use peniko::kurbo::{Insets, Point, Rect, Size};

use crate::{ParagraphStyle, TextFont};

/// Measures the extent of a text marker.
pub trait TextMeasurer {
    /// The size of `text` set in `font`.
    fn measure(&self, text: &str, font: &TextFont) -> Size;
}

impl<F: Fn(&str, &TextFont) -> Size> TextMeasurer for F {
    fn measure(&self, text: &str, font: &TextFont) -> Size {
        self(text, font)
    }
}

/// Estimates text extents from the font size alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApproximateMeasurer {
    /// Advance of every character, as a fraction of the font size.
    pub advance: f64,
    /// Line height, as a fraction of the font size.
    pub line_height: f64,
}

impl Default for ApproximateMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for ApproximateMeasurer {
    fn measure(&self, text: &str, font: &TextFont) -> Size {
        let chars = text.chars().count() as f64;
        Size::new(
            chars * font.size * self.advance,
            font.size * self.line_height,
        )
    }
}

/// The strip in front of the line's text reserved for the marker.
pub fn spacer_rect(line: Rect, inset: Insets, style: &ParagraphStyle) -> Rect {
    Rect::from_origin_size(
        Point::new(line.x0 + inset.x0, line.y0 + inset.y0),
        Size::new(style.first_line_head_indent, line.height()),
    )
}

/// Scales `size` down, keeping its aspect ratio, so that it is no taller than `height`.
pub fn fit_height(size: Size, height: f64) -> Size {
    if size.height <= height {
        return size;
    }
    if height <= 0.0 {
        return Size::ZERO;
    }
    let scale = size.height / height;
    Size::new(size.width / scale, size.height / scale)
}

/// Rect for a text marker of `size`: right aligned in the spacer, below the paragraph spacing.
pub fn text_marker_rect(size: Size, line: Rect, inset: Insets, style: &ParagraphStyle) -> Rect {
    let spacer = spacer_rect(line, inset, style);
    let size = fit_height(size, spacer.height());
    Rect::from_origin_size(
        Point::new(
            spacer.x1 - size.width,
            spacer.y0 + style.paragraph_spacing_before,
        ),
        size,
    )
}

/// Rect for an image marker of `size`: right aligned and vertically centered in the spacer.
pub fn image_marker_rect(size: Size, line: Rect, inset: Insets, style: &ParagraphStyle) -> Rect {
    let spacer = spacer_rect(line, inset, style);
    let size = fit_height(size, spacer.height());
    Rect::from_origin_size(
        Point::new(
            spacer.x1 - size.width,
            spacer.center().y - size.height / 2.0,
        ),
        size,
    )
}

/// Vertical shift applied to markers of lines with a line height multiple.
///
/// Lines taller than their natural height carry the extra space above the glyphs.
pub fn line_height_offset(line_height: f64, style: &ParagraphStyle) -> f64 {
    let multiple = style.line_height_multiple.max(1.0);
    line_height - line_height / multiple
}

#[cfg(test)]
mod tests {
    use super::{
        fit_height, image_marker_rect, line_height_offset, text_marker_rect, ApproximateMeasurer,
        TextMeasurer,
    };
    use crate::{ParagraphStyle, TextFont};
    use peniko::kurbo::{Insets, Rect, Size};

    fn style(indent: f64) -> ParagraphStyle {
        ParagraphStyle {
            first_line_head_indent: indent,
            head_indent: indent,
            ..ParagraphStyle::default()
        }
    }

    #[test]
    fn text_markers_hug_the_text() {
        let line = Rect::new(0.0, 20.0, 300.0, 40.0);
        let style = ParagraphStyle {
            paragraph_spacing_before: 3.0,
            ..style(25.0)
        };
        let rect = text_marker_rect(Size::new(12.0, 14.0), line, Insets::ZERO, &style);
        assert_eq!(rect, Rect::new(13.0, 23.0, 25.0, 37.0));
    }

    #[test]
    fn container_inset_moves_the_spacer() {
        let line = Rect::new(0.0, 0.0, 300.0, 20.0);
        let inset = Insets::new(8.0, 4.0, 0.0, 0.0);
        let rect = text_marker_rect(Size::new(10.0, 10.0), line, inset, &style(50.0));
        assert_eq!(rect, Rect::new(48.0, 4.0, 58.0, 14.0));
    }

    #[test]
    fn image_markers_are_centered() {
        let line = Rect::new(0.0, 0.0, 300.0, 20.0);
        let rect = image_marker_rect(Size::new(5.0, 5.0), line, Insets::ZERO, &style(25.0));
        assert_eq!(rect, Rect::new(20.0, 7.5, 25.0, 12.5));
    }

    #[test]
    fn tall_markers_shrink_to_the_line() {
        assert_eq!(fit_height(Size::new(40.0, 40.0), 20.0), Size::new(20.0, 20.0));
        assert_eq!(fit_height(Size::new(4.0, 8.0), 20.0), Size::new(4.0, 8.0));
        assert_eq!(fit_height(Size::new(4.0, 8.0), 0.0), Size::ZERO);

        let line = Rect::new(0.0, 0.0, 300.0, 10.0);
        let rect = image_marker_rect(Size::new(30.0, 20.0), line, Insets::ZERO, &style(25.0));
        assert_eq!(rect.size(), Size::new(15.0, 10.0));
        assert_eq!(rect.x1, 25.0);
    }

    #[test]
    fn line_height_multiple_shifts_down() {
        let natural = style(25.0);
        assert_eq!(line_height_offset(30.0, &natural), 0.0);
        let loose = ParagraphStyle {
            line_height_multiple: 1.5,
            ..natural
        };
        assert_eq!(line_height_offset(30.0, &loose), 10.0);
    }

    #[test]
    fn approximate_measurer_scales_with_font() {
        let measurer = ApproximateMeasurer::default();
        let size = measurer.measure("10.", &TextFont::system(10.0));
        assert_eq!(size, Size::new(18.0, 12.0));
    }
}
