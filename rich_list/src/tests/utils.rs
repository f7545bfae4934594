// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{
    FixedWidthLayout, ListFormatting, ListIdentity, ListItem, ListParser, ListTextExt, ListValue,
    MarkerNumbering, MarkerPlacement, MarkerRegistry, ParagraphStyle, RichText, TextAttribute,
};

/// Indentation per level used throughout the tests.
pub(crate) const INDENT: f64 = ListFormatting::DEFAULT_INDENTATION;

/// Builds text line by line.
#[derive(Debug, Default)]
pub(crate) struct TextBuilder {
    text: RichText,
}

impl TextBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `content` as list text at `level`, tagged `value`.
    pub(crate) fn list(mut self, content: &str, level: usize, value: &ListValue) -> Self {
        self.text.push_str(content, list_attributes(level, value));
        self
    }

    /// Like [`Self::list`], with a list identity.
    pub(crate) fn list_with_identity(
        mut self,
        content: &str,
        level: usize,
        value: &ListValue,
        identity: &str,
    ) -> Self {
        let mut attributes = list_attributes(level, value);
        attributes.push(TextAttribute::ListIdentity(ListIdentity::new(identity)));
        self.text.push_str(content, attributes);
        self
    }

    /// Appends text that is not in a list.
    pub(crate) fn plain(mut self, content: &str) -> Self {
        self.text.push_str(content, []);
        self
    }

    pub(crate) fn build(self) -> RichText {
        self.text
    }
}

fn list_attributes(level: usize, value: &ListValue) -> Vec<TextAttribute> {
    Vec::from([
        TextAttribute::Paragraph(ParagraphStyle::for_level(level, INDENT)),
        TextAttribute::ListItem(value.clone()),
    ])
}

/// Numbered items with unattributed text.
pub(crate) fn numbered(items: &[(&str, usize)]) -> RichText {
    let items: Vec<ListItem> = items
        .iter()
        .map(|(text, level)| ListItem::plain(text, *level, ListValue::Numbered))
        .collect();
    ListParser::to_text(&items, INDENT)
}

/// A layout without soft wraps, 10 units per character and 20 per line.
pub(crate) fn layout(text: &RichText) -> FixedWidthLayout {
    FixedWidthLayout::new(text.as_str(), 0, 10.0, 20.0)
}

/// Scans `text` with the default registry and formatting.
pub(crate) fn scan(text: &RichText) -> Vec<MarkerPlacement> {
    let formatting = ListFormatting::default();
    let registry = MarkerRegistry::with_defaults();
    MarkerNumbering::new(&formatting, &registry).scan(text, &layout(text))
}

/// `(level, index)` of each placement.
pub(crate) fn levels_and_indices(placements: &[MarkerPlacement]) -> Vec<(usize, usize)> {
    placements.iter().map(|p| (p.level, p.index)).collect()
}

/// Marker texts of each placement, `"<image>"` for images.
pub(crate) fn marker_texts(placements: &[MarkerPlacement]) -> Vec<&str> {
    placements
        .iter()
        .map(|p| p.marker.as_text().unwrap_or("<image>"))
        .collect()
}

/// First line level of every line of `text` that starts in a list.
pub(crate) fn list_levels(text: &RichText) -> Vec<usize> {
    let mut levels = Vec::new();
    let mut start = 0;
    for line in text.as_str().split('\n') {
        if !line.is_empty() && text.list_value_at(start).is_some() {
            let level = text
                .paragraph_style_at(start)
                .map_or(0, |style| style.first_line_level(INDENT));
            levels.push(level);
        }
        start += line.len() + 1;
    }
    levels
}
