// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributes understood by the list engine.

use alloc::sync::Arc;

use peniko::Color;
use rich_text::AttributedText;

/// Text with [`TextAttribute`] spans.
pub type RichText = AttributedText<TextAttribute>;

/// Zero width space, used to give an otherwise empty list line something to lay out.
pub const BLANK_LINE_FILLER: &str = "\u{200B}";

/// An attribute applied to a span of [`RichText`].
#[derive(Clone, Debug, PartialEq)]
pub enum TextAttribute {
    /// Paragraph formatting. The list level of a line is derived from its indentation.
    Paragraph(ParagraphStyle),
    /// Membership in a list. The value selects the marker style.
    ListItem(ListValue),
    /// Identity of a logical list, used to continue numbering across interruptions.
    ListIdentity(ListIdentity),
    /// On a line break: the following line continues the current list item.
    SkipNextListMarker,
    /// Marks synthetic content such as line breaks inserted between list items.
    ContentType(ContentType),
    /// Font of the text.
    Font(TextFont),
    /// Color of the text.
    Color(Color),
}

/// The discriminant of a [`TextAttribute`], for removing attributes by kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// [`TextAttribute::Paragraph`]
    Paragraph,
    /// [`TextAttribute::ListItem`]
    ListItem,
    /// [`TextAttribute::ListIdentity`]
    ListIdentity,
    /// [`TextAttribute::SkipNextListMarker`]
    SkipNextListMarker,
    /// [`TextAttribute::ContentType`]
    ContentType,
    /// [`TextAttribute::Font`]
    Font,
    /// [`TextAttribute::Color`]
    Color,
}

impl TextAttribute {
    /// Returns the kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Paragraph(_) => AttributeKind::Paragraph,
            Self::ListItem(_) => AttributeKind::ListItem,
            Self::ListIdentity(_) => AttributeKind::ListIdentity,
            Self::SkipNextListMarker => AttributeKind::SkipNextListMarker,
            Self::ContentType(_) => AttributeKind::ContentType,
            Self::Font(_) => AttributeKind::Font,
            Self::Color(_) => AttributeKind::Color,
        }
    }

    /// Returns the paragraph style if this is a [`TextAttribute::Paragraph`].
    pub fn as_paragraph(&self) -> Option<&ParagraphStyle> {
        match self {
            Self::Paragraph(style) => Some(style),
            _ => None,
        }
    }

    /// Returns the list value if this is a [`TextAttribute::ListItem`].
    pub fn as_list_value(&self) -> Option<&ListValue> {
        match self {
            Self::ListItem(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the identity if this is a [`TextAttribute::ListIdentity`].
    pub fn as_list_identity(&self) -> Option<&ListIdentity> {
        match self {
            Self::ListIdentity(identity) => Some(identity),
            _ => None,
        }
    }

    /// Returns the font if this is a [`TextAttribute::Font`].
    pub fn as_font(&self) -> Option<&TextFont> {
        match self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Returns the color if this is a [`TextAttribute::Color`].
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Returns the content type if this is a [`TextAttribute::ContentType`].
    pub fn as_content_type(&self) -> Option<ContentType> {
        match self {
            Self::ContentType(content) => Some(*content),
            _ => None,
        }
    }
}

/// Paragraph level formatting.
///
/// All lengths are in layout units. List levels are encoded as indentation: a line at level `n`
/// has both indents set to `n * unit`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    /// Indentation of the first line of the paragraph.
    pub first_line_head_indent: f64,
    /// Indentation of the remaining lines of the paragraph.
    pub head_indent: f64,
    /// Space above the paragraph.
    pub paragraph_spacing_before: f64,
    /// Line height multiplier. Values below `1.0` (including the default `0.0`) mean "natural".
    pub line_height_multiple: f64,
}

impl ParagraphStyle {
    /// A style for list `level` with no hanging indent.
    pub fn for_level(level: usize, unit: f64) -> Self {
        Self::default().with_level(level, unit)
    }

    /// Returns this style with both indents set for list `level`.
    #[must_use]
    pub fn with_level(mut self, level: usize, unit: f64) -> Self {
        let indent = level as f64 * unit;
        self.first_line_head_indent = indent;
        self.head_indent = indent;
        self
    }

    /// The list level encoded in [`head_indent`](Self::head_indent).
    pub fn level(&self, unit: f64) -> usize {
        level_for_indent(self.head_indent, unit)
    }

    /// The list level encoded in [`first_line_head_indent`](Self::first_line_head_indent).
    ///
    /// This is the level used when placing markers, since markers sit in the first line indent.
    pub fn first_line_level(&self, unit: f64) -> usize {
        level_for_indent(self.first_line_head_indent, unit)
    }
}

/// Converts an indent to a level, truncating toward zero.
///
/// Degenerate inputs (non-positive or non-finite) yield level 0.
pub(crate) fn level_for_indent(indent: f64, unit: f64) -> usize {
    if !(unit > 0.0 && unit.is_finite()) {
        return 0;
    }
    // Absorbs the rounding error of `level * unit / unit`.
    let level = indent / unit + 1e-9;
    if level.is_finite() && level >= 1.0 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Truncation toward zero is the intended rounding; the cast saturates."
        )]
        let level = level as usize;
        level
    } else {
        0
    }
}

/// The list membership tag of a span.
///
/// Selects the marker generator for the list and groups adjacent lines into one list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListValue {
    /// An ordered list.
    Numbered,
    /// An unordered list.
    Bulleted,
    /// A caller defined list kind.
    Custom(Arc<str>),
}

impl ListValue {
    /// A caller defined list kind.
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        Self::Custom(name.into())
    }
}

/// Identity of a logical list.
///
/// Lines sharing an identity are numbered as one sequence within a scan, even when ordinary text
/// separates them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListIdentity(Arc<str>);

impl ListIdentity {
    /// Creates an identity from a name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The name of this identity.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kinds of synthetic content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ContentType {
    /// A line break that separates or continues list items.
    Newline,
}

/// A font request: family name and size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFont {
    /// Family name.
    pub family: Arc<str>,
    /// Size in layout units.
    pub size: f64,
}

impl TextFont {
    /// Generic family name for the platform UI font.
    pub const SYSTEM_FAMILY: &'static str = "system-ui";

    /// A font of the given family and size.
    pub fn new(family: impl Into<Arc<str>>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The system UI font at `size`.
    pub fn system(size: f64) -> Self {
        Self::new(Self::SYSTEM_FAMILY, size)
    }
}

impl Default for TextFont {
    fn default() -> Self {
        Self::system(17.0)
    }
}

/// List related queries on [`RichText`].
///
/// All lookups return the effective (last applied) value at a byte offset. Offsets past the end
/// of the text find nothing.
pub trait ListTextExt {
    /// The paragraph style at `index`.
    fn paragraph_style_at(&self, index: usize) -> Option<&ParagraphStyle>;
    /// The list membership tag at `index`.
    fn list_value_at(&self, index: usize) -> Option<&ListValue>;
    /// The list identity at `index`.
    fn list_identity_at(&self, index: usize) -> Option<&ListIdentity>;
    /// Whether the character at `index` carries [`TextAttribute::SkipNextListMarker`].
    fn skips_marker_at(&self, index: usize) -> bool;
    /// The font at `index`.
    fn font_at(&self, index: usize) -> Option<&TextFont>;
    /// The text color at `index`.
    fn color_at(&self, index: usize) -> Option<Color>;
    /// Whether the byte at `index` is a line break.
    fn is_line_break_at(&self, index: usize) -> bool;
}

impl ListTextExt for RichText {
    fn paragraph_style_at(&self, index: usize) -> Option<&ParagraphStyle> {
        self.effective_at(index, TextAttribute::as_paragraph)
    }

    fn list_value_at(&self, index: usize) -> Option<&ListValue> {
        self.effective_at(index, TextAttribute::as_list_value)
    }

    fn list_identity_at(&self, index: usize) -> Option<&ListIdentity> {
        self.effective_at(index, TextAttribute::as_list_identity)
    }

    fn skips_marker_at(&self, index: usize) -> bool {
        self.attributes_at(index)
            .any(|attr| matches!(attr, TextAttribute::SkipNextListMarker))
    }

    fn font_at(&self, index: usize) -> Option<&TextFont> {
        self.effective_at(index, TextAttribute::as_font)
    }

    fn color_at(&self, index: usize) -> Option<Color> {
        self.effective_at(index, TextAttribute::as_color)
    }

    fn is_line_break_at(&self, index: usize) -> bool {
        self.as_str().as_bytes().get(index) == Some(&b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::{level_for_indent, ListTextExt, ListValue, ParagraphStyle, RichText, TextAttribute};

    #[test]
    fn levels_survive_the_indent_round_trip() {
        for unit in [25.0, 50.0, 0.1, 7.3] {
            for level in 0..12 {
                let style = ParagraphStyle::for_level(level, unit);
                assert_eq!(style.level(unit), level, "unit {unit}");
                assert_eq!(style.first_line_level(unit), level, "unit {unit}");
            }
        }
    }

    #[test]
    fn degenerate_indents_are_level_zero() {
        assert_eq!(level_for_indent(50.0, 0.0), 0);
        assert_eq!(level_for_indent(50.0, -25.0), 0);
        assert_eq!(level_for_indent(-50.0, 25.0), 0);
        assert_eq!(level_for_indent(f64::NAN, 25.0), 0);
        assert_eq!(level_for_indent(f64::INFINITY, 25.0), 0);
        assert_eq!(level_for_indent(60.0, 25.0), 2);
    }

    #[test]
    fn queries_read_the_last_applied_value() {
        let mut text = RichText::new("one\ntwo");
        text.apply_attribute(text.full_range(), TextAttribute::ListItem(ListValue::Numbered));
        text.apply_attribute_bytes(4..7, TextAttribute::ListItem(ListValue::Bulleted))
            .unwrap();
        text.apply_attribute_bytes(3..4, TextAttribute::SkipNextListMarker)
            .unwrap();

        assert_eq!(text.list_value_at(0), Some(&ListValue::Numbered));
        assert_eq!(text.list_value_at(5), Some(&ListValue::Bulleted));
        assert_eq!(text.list_value_at(7), None);
        assert!(text.skips_marker_at(3));
        assert!(!text.skips_marker_at(4));
        assert!(text.is_line_break_at(3));
        assert!(!text.is_line_break_at(99));
        assert_eq!(text.paragraph_style_at(0), None);
    }
}
