// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::color::palette;
use peniko::kurbo::Insets;
use peniko::Color;

use crate::{ParagraphStyle, TextFont};

/// Options shared by parsing, numbering and editing.
///
/// Supplies the values used where the text itself carries no formatting.
#[derive(Clone, Debug, PartialEq)]
pub struct ListFormatting {
    /// Indentation per list level, in layout units. Must be positive.
    pub indentation: f64,
    /// Paragraph spacing applied above list lines when they are indented.
    pub spacing_before: f64,
    /// Font for lines without a font attribute.
    pub default_font: TextFont,
    /// Color for markers.
    pub text_color: Color,
    /// Offset of the text container within the drawing surface.
    pub container_inset: Insets,
    /// Paragraph style for lines without one.
    pub default_paragraph_style: ParagraphStyle,
}

impl ListFormatting {
    /// The default indentation per level.
    pub const DEFAULT_INDENTATION: f64 = 25.0;

    /// Returns these options with `indentation` set.
    #[must_use]
    pub fn with_indentation(mut self, indentation: f64) -> Self {
        self.indentation = indentation;
        self
    }

    /// Returns these options with `spacing_before` set.
    #[must_use]
    pub fn with_spacing_before(mut self, spacing_before: f64) -> Self {
        self.spacing_before = spacing_before;
        self
    }

    /// Returns these options with `default_font` set.
    #[must_use]
    pub fn with_default_font(mut self, font: TextFont) -> Self {
        self.default_font = font;
        self
    }

    /// Returns these options with `text_color` set.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Returns these options with `container_inset` set.
    #[must_use]
    pub fn with_container_inset(mut self, inset: Insets) -> Self {
        self.container_inset = inset;
        self
    }

    /// Returns these options with `default_paragraph_style` set.
    #[must_use]
    pub fn with_default_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.default_paragraph_style = style;
        self
    }

    pub(crate) fn has_valid_indentation(&self) -> bool {
        self.indentation > 0.0 && self.indentation.is_finite()
    }
}

impl Default for ListFormatting {
    fn default() -> Self {
        Self {
            indentation: Self::DEFAULT_INDENTATION,
            spacing_before: 0.0,
            default_font: TextFont::default(),
            text_color: palette::css::BLACK,
            container_inset: Insets::ZERO,
            default_paragraph_style: ParagraphStyle::default(),
        }
    }
}
