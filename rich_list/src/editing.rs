// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List edits on [`RichText`].
//!
//! These are the edits an editor makes to list lines: indenting and outdenting, turning lines
//! into a list and back, soft line breaks inside an item, and repairing level jumps. Levels live
//! in paragraph indentation, so every edit comes down to rewriting paragraph styles and list tags.
//!
//! All offsets are byte offsets. A "line" is the text between two line breaks, without the break.

use alloc::format;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use hashbrown::HashSet;
use rich_text::TextRange;

use crate::{
    AttributeKind, ContentType, ListFormatting, ListIdentity, ListTextExt, ListValue,
    ParagraphStyle, RichText, TextAttribute, BLANK_LINE_FILLER,
};

/// Direction of an indentation change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Indentation {
    /// One level deeper.
    Indent,
    /// One level shallower.
    Outdent,
}

/// Errors returned by list edits.
#[derive(Clone, Debug, PartialEq)]
pub enum EditError {
    /// The requested range does not fit the text.
    Range(rich_text::Error),
    /// The indentation per level is not a positive, finite length.
    InvalidIndentation {
        /// The rejected indentation.
        indentation: f64,
    },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(err) => write!(f, "cannot edit list: {err}"),
            Self::InvalidIndentation { indentation } => {
                write!(f, "indentation per level must be positive, got {indentation}")
            }
        }
    }
}

impl core::error::Error for EditError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Range(err) => Some(err),
            Self::InvalidIndentation { .. } => None,
        }
    }
}

impl From<rich_text::Error> for EditError {
    fn from(err: rich_text::Error) -> Self {
        Self::Range(err)
    }
}

/// The lines touching `range`.
///
/// A range ending just after a line break does not reach into the following line. An empty
/// range yields the line containing it.
pub fn content_lines(text: &str, range: Range<usize>) -> Result<Vec<Range<usize>>, rich_text::Error> {
    let range = TextRange::new(text, range)?.as_range();
    let last = range.end.saturating_sub(1).max(range.start);
    let mut lines = Vec::new();
    let mut start = line_start(text, range.start);
    loop {
        let end = line_end(text, start);
        lines.push(start..end);
        if end >= text.len() || end + 1 > last {
            break;
        }
        start = end + 1;
    }
    Ok(lines)
}

/// `style` moved one level in the direction of `indentation`.
///
/// Indents are snapped to whole levels. List lines get the list spacing; a line outdented to
/// level 0 gets the spacing of the default paragraph style back.
pub fn updated_paragraph_style(
    style: &ParagraphStyle,
    formatting: &ListFormatting,
    indentation: Indentation,
) -> ParagraphStyle {
    let unit = formatting.indentation;
    let level = style.first_line_level(unit);
    let level = match indentation {
        Indentation::Indent => level + 1,
        Indentation::Outdent => level.saturating_sub(1),
    };
    let mut updated = style.clone().with_level(level, unit);
    updated.paragraph_spacing_before = if level == 0 && indentation == Indentation::Outdent {
        formatting.default_paragraph_style.paragraph_spacing_before
    } else {
        formatting.spacing_before
    };
    updated
}

/// Indents or outdents every line touching `range`.
///
/// A line can be at most one level deeper than the line before it, and the first line of the
/// text at most level 1. Lines are processed in order, and processing stops at the first line
/// that would break this rule. Lines nested below an edited line move with it.
///
/// Lines outside a list become list lines tagged with `value`, falling back to the tag of the
/// text before them and then to [`ListValue::Bulleted`]. Empty lines get [`BLANK_LINE_FILLER`]
/// so that they have something to lay out. A list line outdented to level 0 leaves the list,
/// together with the line breaks on either side of it.
pub fn change_indentation(
    text: &mut RichText,
    range: Range<usize>,
    formatting: &ListFormatting,
    indentation: Indentation,
    value: Option<ListValue>,
) -> Result<(), EditError> {
    check_indentation(formatting)?;
    let lines = content_lines(text.as_str(), range)?;
    let mut shift = 0;
    for line in lines {
        let line = line.start + shift..line.end + shift;
        let tagged = !line.is_empty() && text.list_value_at(line.start).is_some();
        if !tagged {
            shift += new_list_line(text, line, formatting, indentation, value.as_ref())?;
        } else if !move_list_line(text, line, formatting, indentation) {
            break;
        }
    }
    Ok(())
}

/// Turns the lines touching `range` into list lines tagged `value`, or takes them out of any
/// list when `value` is `None`.
///
/// The lines join the list of the line before or after them when it has the same tag, taking its
/// [`ListIdentity`] if it has one, and start a new identity otherwise. Every line sharing that identity is retagged with `value`,
/// so switching one line of a list from bullets to numbers switches the whole list. Lines at
/// level 0 are moved to level 1.
pub fn apply_list(
    text: &mut RichText,
    range: Range<usize>,
    value: Option<ListValue>,
    formatting: &ListFormatting,
) -> Result<(), EditError> {
    check_indentation(formatting)?;
    let lines = content_lines(text.as_str(), range)?;
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Ok(());
    };
    let mut lines = first.start..last.end;

    let Some(value) = value else {
        let target = with_break(text.as_str(), &lines);
        if !target.is_empty() {
            let style = formatting.default_paragraph_style.clone();
            text.apply_attribute(target, TextAttribute::Paragraph(style));
            text.remove_attributes(target, is_list_tag);
        }
        return Ok(());
    };

    let identity = identity_for(text, &lines, &value);
    if lines.is_empty() {
        text.insert_str(lines.start, BLANK_LINE_FILLER)?;
        lines.end += BLANK_LINE_FILLER.len();
    }
    let target = with_break(text.as_str(), &lines);

    let Some(identity) = identity else {
        tag_list_range(text, target.as_range(), &value, formatting);
        return Ok(());
    };
    let same_list: Vec<Range<usize>> = text
        .runs(text.full_range(), TextAttribute::as_list_identity)
        .filter(|(_, found)| *found == Some(&identity))
        .map(|(range, _)| range)
        .collect();
    for range in same_list {
        tag_list_range(text, range, &value, formatting);
    }
    tag_list_range(text, target.as_range(), &value, formatting);
    text.apply_attribute(target, TextAttribute::ListIdentity(identity));
    Ok(())
}

/// Inserts a line break at `at` that continues the current list item.
///
/// The break takes the list tags and paragraph style of the item it is inserted into and carries
/// [`TextAttribute::SkipNextListMarker`]. Outside a list this inserts an ordinary line break.
pub fn insert_soft_break(text: &mut RichText, at: usize) -> Result<(), EditError> {
    text.range(at..at)?;
    let source = if text.list_value_at(at).is_some() {
        Some(at)
    } else {
        at.checked_sub(1)
            .filter(|&before| text.list_value_at(before).is_some())
    };

    let mut attributes = Vec::from([TextAttribute::ContentType(ContentType::Newline)]);
    if let Some(source) = source {
        attributes.push(TextAttribute::SkipNextListMarker);
        attributes.extend(text.paragraph_style_at(source).cloned().map(TextAttribute::Paragraph));
        attributes.extend(text.list_value_at(source).cloned().map(TextAttribute::ListItem));
        attributes.extend(
            text.list_identity_at(source)
                .cloned()
                .map(TextAttribute::ListIdentity),
        );
    }
    text.insert_str(at, "\n")?;
    let range = TextRange::new_unchecked(at, at + 1);
    for attribute in attributes {
        text.apply_attribute(range, attribute);
    }
    Ok(())
}

/// Moves list lines that are more than one level deeper than the line before them up to one
/// level deeper, returning how many lines changed.
///
/// Continuation lines are left alone. Does nothing if the indentation per level is invalid.
pub fn normalize_levels(text: &mut RichText, formatting: &ListFormatting) -> usize {
    if !formatting.has_valid_indentation() {
        return 0;
    }
    let unit = formatting.indentation;
    let regions: Vec<Range<usize>> = text
        .runs(text.full_range(), TextAttribute::as_list_value)
        .filter_map(|(range, value)| value.map(|_| range))
        .collect();

    let mut count = 0;
    for region in regions {
        let Ok(lines) = content_lines(text.as_str(), region.clone()) else {
            continue;
        };
        let mut previous = region
            .start
            .checked_sub(1)
            .filter(|&before| text.list_value_at(before).is_some())
            .and_then(|before| text.paragraph_style_at(before))
            .map_or(0, |style| style.first_line_level(unit));

        let mut changes = Vec::new();
        for line in lines {
            if line.start > 0 && text.skips_marker_at(line.start - 1) {
                continue;
            }
            let Some(style) = text.paragraph_style_at(line.start) else {
                previous = 0;
                continue;
            };
            let level = style.first_line_level(unit);
            if level > previous + 1 {
                previous += 1;
                let clamped = style.clone().with_level(previous, unit);
                changes.push((with_break(text.as_str(), &line), clamped));
            } else {
                previous = level;
            }
        }
        count += changes.len();
        for (range, style) in changes {
            log::debug!("clamping list line {range:?} to level {}", style.first_line_level(unit));
            text.apply_attribute(range, TextAttribute::Paragraph(style));
        }
    }
    count
}

fn check_indentation(formatting: &ListFormatting) -> Result<(), EditError> {
    if formatting.has_valid_indentation() {
        Ok(())
    } else {
        Err(EditError::InvalidIndentation {
            indentation: formatting.indentation,
        })
    }
}

/// Makes a list line out of a line that is not in a list. Returns the number of bytes inserted.
fn new_list_line(
    text: &mut RichText,
    mut line: Range<usize>,
    formatting: &ListFormatting,
    indentation: Indentation,
    value: Option<&ListValue>,
) -> Result<usize, EditError> {
    let before = line.start.checked_sub(1);
    let value = value
        .or_else(|| before.and_then(|at| text.list_value_at(at)))
        .cloned()
        .unwrap_or(ListValue::Bulleted);
    let identity = before.and_then(|at| text.list_identity_at(at)).cloned();
    let base = text
        .paragraph_style_at(line.start)
        .unwrap_or(&formatting.default_paragraph_style);
    let style = updated_paragraph_style(base, formatting, indentation);
    let level = style.first_line_level(formatting.indentation);

    let mut inserted = 0;
    if line.is_empty() {
        text.insert_str(line.start, BLANK_LINE_FILLER)?;
        inserted = BLANK_LINE_FILLER.len();
        line.end += inserted;
    }
    let target = with_break(text.as_str(), &line);
    text.apply_attribute(target, TextAttribute::Paragraph(style));
    if level > 0 {
        let content = TextRange::new_unchecked(line.start, line.end);
        text.apply_attribute(content, TextAttribute::ListItem(value));
        if let Some(identity) = identity {
            text.apply_attribute(content, TextAttribute::ListIdentity(identity));
        }
        if let Some(at) = line.start.checked_sub(1) {
            join_break(text, at, at.wrapping_sub(1));
        }
        if text.list_value_at(line.end + 1).is_some() {
            join_break(text, line.end, line.end - 1);
        }
    }
    Ok(inserted)
}

/// Indents or outdents a list line and the lines nested below it.
///
/// Returns `false`, changing nothing, if the line would end up too deep.
fn move_list_line(
    text: &mut RichText,
    line: Range<usize>,
    formatting: &ListFormatting,
    indentation: Indentation,
) -> bool {
    let unit = formatting.indentation;
    let original = text
        .paragraph_style_at(line.start)
        .unwrap_or(&formatting.default_paragraph_style)
        .clone();
    let style = updated_paragraph_style(&original, formatting, indentation);
    let level = style.first_line_level(unit);

    let previous = previous_line(text.as_str(), line.start);
    let limit = match previous.clone().filter(|previous| !previous.is_empty()) {
        Some(previous) => {
            text.paragraph_style_at(previous.start)
                .map_or(0, |style| style.first_line_level(unit))
                + 1
        }
        None => 1,
    };
    if level > limit {
        log::debug!("not moving list line {line:?} to level {level}, at most {limit} allowed");
        return false;
    }

    let target = with_break(text.as_str(), &line);
    text.apply_attribute(target, TextAttribute::Paragraph(style));
    if level == 0 {
        text.remove_attributes(target, is_list_tag);
        if let Some(previous) = previous {
            let line_break = TextRange::new_unchecked(previous.end, previous.end + 1);
            text.remove_attributes(line_break, is_list_tag);
        }
    }
    move_children(text, &line, &original, formatting, indentation);
    true
}

/// Moves the lines nested below `line` along with it.
///
/// These are the lines of the list following `line` that are deeper than its original level, up
/// to the first one that is not.
fn move_children(
    text: &mut RichText,
    line: &Range<usize>,
    original: &ParagraphStyle,
    formatting: &ListFormatting,
    indentation: Indentation,
) {
    let unit = formatting.indentation;
    let next = line.end + 1;
    if line.end >= text.len() || text.list_value_at(next).is_none() {
        return;
    }
    let rest = TextRange::new_unchecked(next, text.len());
    let Some((sublist, _)) = text.runs(rest, TextAttribute::as_list_value).next() else {
        return;
    };
    let child_level = original.first_line_level(unit) + 1;

    let mut changes = Vec::new();
    let sublist = TextRange::new_unchecked(sublist.start, sublist.end);
    for (run, style) in text.runs(sublist, TextAttribute::as_paragraph) {
        let Some(style) = style else {
            continue;
        };
        if style.first_line_level(unit) < child_level {
            break;
        }
        let moved = updated_paragraph_style(style, formatting, indentation);
        changes.push((TextRange::new_unchecked(run.start, run.end), moved));
    }
    for (range, style) in changes {
        text.apply_attribute(range, TextAttribute::Paragraph(style));
    }
}

/// Tags `range` as part of a list with `value`, raising level 0 paragraphs to level 1 and
/// joining the line break before it to the list above.
fn tag_list_range(
    text: &mut RichText,
    range: Range<usize>,
    value: &ListValue,
    formatting: &ListFormatting,
) {
    if range.is_empty() {
        return;
    }
    if let Some(at) = range.start.checked_sub(1) {
        join_break(text, at, at.wrapping_sub(1));
    }
    let unit = formatting.indentation;
    let range = TextRange::new_unchecked(range.start, range.end);
    let raised: Vec<_> = text
        .runs(range, TextAttribute::as_paragraph)
        .filter(|(_, style)| style.is_none_or(|style| style.first_line_level(unit) == 0))
        .map(|(run, style)| {
            let style = style.unwrap_or(&formatting.default_paragraph_style);
            (
                TextRange::new_unchecked(run.start, run.end),
                updated_paragraph_style(style, formatting, Indentation::Indent),
            )
        })
        .collect();
    for (run, style) in raised {
        text.apply_attribute(run, TextAttribute::Paragraph(style));
    }
    text.apply_attribute(range, TextAttribute::ListItem(value.clone()));
}

/// Copies the list tags at `from` onto the untagged line break at `at`.
fn join_break(text: &mut RichText, at: usize, from: usize) {
    if !text.is_line_break_at(at) || text.list_value_at(at).is_some() {
        return;
    }
    let Some(value) = text.list_value_at(from).cloned() else {
        return;
    };
    let identity = text.list_identity_at(from).cloned();
    let line_break = TextRange::new_unchecked(at, at + 1);
    text.apply_attribute(line_break, TextAttribute::ListItem(value));
    if let Some(identity) = identity {
        text.apply_attribute(line_break, TextAttribute::ListIdentity(identity));
    }
}

/// The identity for lines being made into a list with `value`.
///
/// `None` when the lines join a neighbouring list that has no identity.
fn identity_for(text: &RichText, lines: &Range<usize>, value: &ListValue) -> Option<ListIdentity> {
    if let Some(identity) = text.list_identity_at(lines.start) {
        return Some(identity.clone());
    }
    let neighbour = |line: Range<usize>| {
        (text.list_value_at(line.start) == Some(value))
            .then(|| text.list_identity_at(line.start).cloned())
    };
    previous_line(text.as_str(), lines.start)
        .and_then(neighbour)
        .or_else(|| next_line(text.as_str(), lines.end).and_then(neighbour))
        .unwrap_or_else(|| Some(fresh_identity(text)))
}

/// An identity named `list-N` that no span of `text` uses yet.
fn fresh_identity(text: &RichText) -> ListIdentity {
    let taken: HashSet<&str> = text
        .attributes_iter()
        .filter_map(|(_, attribute)| attribute.as_list_identity())
        .map(ListIdentity::as_str)
        .collect();
    let mut n = 1;
    loop {
        let name = format!("list-{n}");
        if !taken.contains(name.as_str()) {
            return ListIdentity::new(name);
        }
        n += 1;
    }
}

fn is_list_tag(attribute: &TextAttribute) -> bool {
    matches!(
        attribute.kind(),
        AttributeKind::ListItem | AttributeKind::ListIdentity
    )
}

fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |found| found + 1)
}

fn line_end(text: &str, start: usize) -> usize {
    text[start..].find('\n').map_or(text.len(), |found| start + found)
}

fn previous_line(text: &str, start: usize) -> Option<Range<usize>> {
    let end = start.checked_sub(1)?;
    Some(line_start(text, end)..end)
}

fn next_line(text: &str, end: usize) -> Option<Range<usize>> {
    let start = end + 1;
    (end < text.len()).then(|| start..line_end(text, start))
}

/// `line` plus the line break ending it, if there is one.
fn with_break(text: &str, line: &Range<usize>) -> TextRange {
    let end = if text.as_bytes().get(line.end) == Some(&b'\n') {
        line.end + 1
    } else {
        line.end
    };
    TextRange::new_unchecked(line.start, end)
}

#[cfg(test)]
mod tests {
    use super::{content_lines, updated_paragraph_style, Indentation};
    use crate::{ListFormatting, ParagraphStyle};

    #[test]
    fn content_lines_cover_the_range() {
        let text = "ab\ncd\n\nef";
        assert_eq!(content_lines(text, 0..0).unwrap(), [0..2]);
        assert_eq!(content_lines(text, 1..4).unwrap(), [0..2, 3..5]);
        assert_eq!(content_lines(text, 0..3).unwrap(), [0..2]);
        assert_eq!(content_lines(text, 6..6).unwrap(), [6..6]);
        assert_eq!(content_lines(text, 4..9).unwrap(), [3..5, 6..6, 7..9]);
        assert_eq!(content_lines(text, 9..9).unwrap(), [7..9]);
        assert!(content_lines(text, 4..20).is_err());
    }

    #[test]
    fn content_lines_of_a_final_empty_line() {
        assert_eq!(content_lines("ab\n", 3..3).unwrap(), [3..3]);
        assert_eq!(content_lines("", 0..0).unwrap(), [0..0]);
    }

    #[test]
    fn indenting_snaps_to_levels_and_sets_spacing() {
        let formatting = ListFormatting::default()
            .with_spacing_before(4.0)
            .with_default_paragraph_style(ParagraphStyle {
                paragraph_spacing_before: 1.0,
                ..ParagraphStyle::default()
            });
        let style = ParagraphStyle {
            first_line_head_indent: 30.0,
            head_indent: 10.0,
            line_height_multiple: 1.5,
            ..ParagraphStyle::default()
        };

        let deeper = updated_paragraph_style(&style, &formatting, Indentation::Indent);
        assert_eq!(deeper.first_line_head_indent, 50.0);
        assert_eq!(deeper.head_indent, 50.0);
        assert_eq!(deeper.paragraph_spacing_before, 4.0);
        assert_eq!(deeper.line_height_multiple, 1.5);

        let out = updated_paragraph_style(&style, &formatting, Indentation::Outdent);
        assert_eq!(out.first_line_head_indent, 0.0);
        assert_eq!(out.paragraph_spacing_before, 1.0);

        let floor = updated_paragraph_style(&out, &formatting, Indentation::Outdent);
        assert_eq!(floor.first_line_head_indent, 0.0);
    }
}
