// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between [`ListItem`]s and [`RichText`].

use alloc::vec::Vec;
use core::ops::Range;

use rich_text::TextRange;
use smallvec::SmallVec;

use crate::{
    ContentType, ListItem, ListItemNode, ListTextExt, ParagraphStyle, ParsedListItem, RichText,
    TextAttribute,
};

/// Converts between list items and the text that represents them.
///
/// In text, a list is a run of characters tagged with [`TextAttribute::ListItem`]. The level of
/// each line is its paragraph indentation divided by the indent unit, and a line break carrying
/// [`TextAttribute::SkipNextListMarker`] continues the current item instead of starting a new one.
#[derive(Copy, Clone, Debug, Default)]
pub struct ListParser;

impl ListParser {
    /// Builds text for `items`, with `indent` layout units per level.
    ///
    /// Items are separated by line breaks. Line breaks already inside an item are marked as
    /// continuations.
    pub fn to_text(items: &[ListItem], indent: f64) -> RichText {
        let mut out = RichText::new("");
        for (i, item) in items.iter().enumerate() {
            let style = ParagraphStyle::for_level(item.level, indent);
            let mut text = item.text.clone();
            let full = text.full_range();
            text.apply_attribute(full, TextAttribute::ListItem(item.value.clone()));
            text.apply_attribute(full, TextAttribute::Paragraph(style.clone()));

            let breaks: Vec<usize> = text.as_str().match_indices('\n').map(|(at, _)| at).collect();
            for at in breaks {
                let range = TextRange::new_unchecked(at, at + 1);
                text.apply_attribute(range, TextAttribute::ContentType(ContentType::Newline));
                text.apply_attribute(range, TextAttribute::SkipNextListMarker);
            }

            if i + 1 < items.len() {
                text.push_str(
                    "\n",
                    [
                        TextAttribute::ContentType(ContentType::Newline),
                        TextAttribute::ListItem(item.value.clone()),
                        TextAttribute::Paragraph(style),
                    ],
                );
            }
            out.append(&text);
        }
        out
    }

    /// Finds the list items in `text`, which uses `indent` layout units per level.
    ///
    /// Each maximal run of equally tagged text is one list, numbered from 1 in
    /// [`ParsedListItem::list_index`]. Text outside lists yields nothing. This never fails:
    /// lines without a paragraph style are items at level 0.
    pub fn from_text(text: &RichText, indent: f64) -> Vec<ParsedListItem> {
        let mut items: Vec<ParsedListItem> = Vec::new();
        let mut ids = ListIds::default();
        let mut list_index = 0;

        for (group, value) in text.runs(text.full_range(), TextAttribute::as_list_value) {
            let Some(value) = value else {
                continue;
            };
            list_index += 1;
            let first_in_group = items.len();
            let group_range = TextRange::new_unchecked(group.start, group.end);

            for (paragraph, style) in text.runs(group_range, TextAttribute::as_paragraph) {
                let level = style.map_or(0, |style| style.level(indent));
                let list_id = ids.next(level);

                for line in item_lines(text, paragraph.clone()) {
                    let continues = items.len() > first_in_group
                        && continues_previous(text, &group, &paragraph, &line);
                    let range = if continues {
                        // Replaces the previous item with one spanning both.
                        let previous = items.pop().map_or(line.start, |p| p.range.start);
                        previous..line.end
                    } else {
                        line
                    };
                    let item = ListItem {
                        text: text.slice(TextRange::new_unchecked(range.start, range.end)),
                        level,
                        list_id,
                        value: value.clone(),
                    };
                    items.push(ParsedListItem {
                        list_index,
                        range,
                        item,
                    });
                }
            }
        }
        items
    }

    /// Finds the list items in `text` and nests them by level.
    pub fn hierarchy(text: &RichText, indent: f64) -> Vec<ListItemNode> {
        ListItemNode::build(Self::from_text(text, indent).into_iter().map(|parsed| parsed.item))
    }
}

/// Allocates `list_id`s.
///
/// Level 1 is always list 1. A deeper level gets a new id each time it is entered from a
/// shallower one, and keeps it while the level stays the same or is returned to from below.
#[derive(Debug, Default)]
struct ListIds {
    entered: SmallVec<[usize; 8]>,
    previous_level: usize,
}

impl ListIds {
    fn next(&mut self, level: usize) -> usize {
        if level == 0 {
            self.previous_level = 0;
            return 0;
        }
        if self.entered.len() <= level {
            self.entered.resize(level + 1, 0);
        }
        if level > self.previous_level || self.entered[level] == 0 {
            self.entered[level] += 1;
        }
        self.previous_level = level;
        if level == 1 {
            1
        } else {
            self.entered[level] * level
        }
    }
}

/// Splits a paragraph run at line breaks that end items.
///
/// Continuation breaks stay inside their line. An empty last line is dropped.
fn item_lines(text: &RichText, paragraph: Range<usize>) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = paragraph.start;
    for (offset, _) in text.as_str()[paragraph.clone()].match_indices('\n') {
        let at = paragraph.start + offset;
        if text.skips_marker_at(at) {
            continue;
        }
        lines.push(start..at);
        start = at + 1;
    }
    lines.push(start..paragraph.end);
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Whether `line` continues the item before it.
///
/// This is the case when the line break before it is a continuation break, or when a paragraph
/// run opens with one.
fn continues_previous(
    text: &RichText,
    group: &Range<usize>,
    paragraph: &Range<usize>,
    line: &Range<usize>,
) -> bool {
    let is_skip_break = |at: usize| text.is_line_break_at(at) && text.skips_marker_at(at);
    let after_skip = line.start > group.start && is_skip_break(line.start - 1);
    let opens_with_skip = line.start == paragraph.start && is_skip_break(line.start);
    after_skip || opens_with_skip
}
