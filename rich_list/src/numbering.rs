// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker numbering.
//!
//! Markers are not stored anywhere. Every layout pass scans the list regions of the text again,
//! deriving levels from paragraph indentation and counting lines per level as it goes. A scan
//! only reads the text, so scanning unchanged text twice gives the same placements.
//!
//! The rules, per visual line of a list region:
//!
//! - A line gets a marker only if the character before it is a line break without
//!   [`SkipNextListMarker`](crate::TextAttribute::SkipNextListMarker). Soft wrapped lines and
//!   continuation lines are skipped.
//! - Lines carrying a [`ListIdentity`] are numbered per identity and level, across all regions
//!   of the scan. Other lines are numbered per level.
//! - Entering a level deeper than 1 from a shallower line restarts that level at 0.
//! - Counters survive from one region to the next only when the regions touch. A region that
//!   follows text outside any list starts from scratch.
//! - Level 0 lines are counted but get no marker.
//!
//! Nothing here fails. Line fragments that do not match the text (as happens mid-edit, before
//! layout has caught up) are skipped and logged at debug level.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;
use peniko::kurbo::{Rect, Vec2};
use peniko::Color;
use rich_text::TextRange;

use crate::geometry::{self, ApproximateMeasurer, TextMeasurer};
use crate::{
    LineFragments, ListFormatting, ListIdentity, ListTextExt, ListValue, Marker, MarkerLookup,
    ParagraphStyle, RichText, TextAttribute, TextFont,
};

/// A marker to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerPlacement {
    /// Text of the line the marker belongs to.
    ///
    /// Empty, and positioned at the end of the region, for the marker of an implicit trailing
    /// empty line.
    pub text_range: Range<usize>,
    /// The line box the marker was placed against.
    pub line_rect: Rect,
    /// Where to draw the marker.
    pub marker_rect: Rect,
    /// What to draw.
    pub marker: Marker,
    /// Font for text markers without their own font.
    pub font: TextFont,
    /// Color to draw the marker in.
    pub color: Color,
    /// Level of the line.
    pub level: usize,
    /// 0-based index of the line within its level or identity.
    pub index: usize,
    /// Level of the line before.
    pub previous_level: usize,
}

/// Counters of one scan.
///
/// A fresh state is created by [`MarkerNumbering::scan`] and dropped when it returns. Hosts that
/// drive [`MarkerNumbering::scan_region`] themselves should do the same.
#[derive(Clone, Debug, Default)]
pub struct ScanState {
    counters: HashMap<usize, usize>,
    number_dict: HashMap<(ListIdentity, usize), usize>,
    previous_level: usize,
}

impl ScanState {
    /// An empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next index at `level`, if the level has been counted.
    pub fn counter(&self, level: usize) -> Option<usize> {
        self.counters.get(&level).copied()
    }

    /// The next index for lines of `identity` at `level`, if any have been counted.
    pub fn identity_counter(&self, identity: &ListIdentity, level: usize) -> Option<usize> {
        self.number_dict.get(&(identity.clone(), level)).copied()
    }

    /// Level of the last line visited, marked or not.
    ///
    /// The scan itself decides restarts from the paragraph before each line. This is kept for
    /// hosts that drive [`MarkerNumbering::scan_region`] themselves and need to know where a
    /// region left off.
    pub fn previous_level(&self) -> usize {
        self.previous_level
    }

    /// Takes the index for a line and advances the counter it came from.
    ///
    /// Lines with an identity count per identity and level, others per level. Either way,
    /// entering a level deeper than 1 from a shallower line restarts it at 0.
    fn take(&mut self, identity: Option<&ListIdentity>, level: usize, previous_level: usize) -> usize {
        let next = match identity {
            Some(identity) => self.number_dict.entry((identity.clone(), level)).or_insert(0),
            None => self.counters.entry(level).or_insert(0),
        };
        if restarts(level, previous_level) {
            *next = 0;
        }
        let index = *next;
        *next += 1;
        index
    }

    /// The index the next line would take, without advancing anything.
    fn peek(&self, identity: Option<&ListIdentity>, level: usize, previous_level: usize) -> usize {
        if restarts(level, previous_level) {
            return 0;
        }
        match identity {
            Some(identity) => self.identity_counter(identity, level),
            None => self.counter(level),
        }
        .unwrap_or(0)
    }
}

fn restarts(level: usize, previous_level: usize) -> bool {
    level > previous_level && level > 1
}

/// A line that gets a marker.
struct MarkedLine<'s> {
    text_range: Range<usize>,
    rect: Rect,
    style: &'s ParagraphStyle,
    font: TextFont,
    color: Option<Color>,
    level: usize,
    index: usize,
    previous_level: usize,
}

/// Decides which list lines get markers, and which.
pub struct MarkerNumbering<'a, L, M = ApproximateMeasurer> {
    formatting: &'a ListFormatting,
    lookup: &'a L,
    measurer: M,
}

impl<'a, L: MarkerLookup> MarkerNumbering<'a, L> {
    /// A numbering that asks `lookup` for markers and estimates text marker sizes.
    pub fn new(formatting: &'a ListFormatting, lookup: &'a L) -> Self {
        Self {
            formatting,
            lookup,
            measurer: ApproximateMeasurer::default(),
        }
    }
}

impl<'a, L: MarkerLookup, M: TextMeasurer> MarkerNumbering<'a, L, M> {
    /// Returns this numbering with text markers measured by `measurer`.
    pub fn with_measurer<N: TextMeasurer>(self, measurer: N) -> MarkerNumbering<'a, L, N> {
        MarkerNumbering {
            formatting: self.formatting,
            lookup: self.lookup,
            measurer,
        }
    }

    /// Places the markers of every list in `text`.
    ///
    /// `layout` must be a layout of `text`.
    pub fn scan(&self, text: &RichText, layout: &impl LineFragments) -> Vec<MarkerPlacement> {
        let mut state = ScanState::new();
        let mut placements = Vec::new();
        for (region, value) in text.runs(text.full_range(), TextAttribute::as_list_value) {
            if let Some(value) = value {
                self.scan_region(text, layout, region, value, &mut state, &mut placements);
            }
        }
        placements
    }

    /// Places the markers of one list region, appending them to `placements`.
    ///
    /// `region` is a maximal run of text tagged with `value`. Regions of one text must be
    /// scanned in order with the same `state`.
    pub fn scan_region(
        &self,
        text: &RichText,
        layout: &impl LineFragments,
        region: Range<usize>,
        value: &ListValue,
        state: &mut ScanState,
        placements: &mut Vec<MarkerPlacement>,
    ) {
        let len = text.len();
        if region.start >= region.end || region.end > len {
            log::debug!("skipping list region {region:?} in text of length {len}");
            return;
        }
        let unit = self.formatting.indentation;

        if region.start == 0 || text.list_value_at(region.start - 1).is_none() {
            state.counters.clear();
        }

        let mut level = 0;
        let mut last_line = None;

        for fragment in layout.line_fragments(region.clone()) {
            let range = fragment.text_range.clone();
            if range.start > range.end
                || range.end > len
                || !text.as_str().is_char_boundary(range.start)
            {
                log::debug!("skipping line fragment {range:?} in text of length {len}");
                continue;
            }

            let (complete, skipped) = match range.start.checked_sub(1) {
                Some(before) => (text.is_line_break_at(before), text.skips_marker_at(before)),
                None => (true, false),
            };
            let style = text
                .paragraph_style_at(range.start)
                .unwrap_or(&self.formatting.default_paragraph_style);
            let previous_level = self.level_before(text, range.start);

            if complete && !skipped {
                level = style.first_line_level(unit);
                let index = state.take(text.list_identity_at(range.start), level, previous_level);
                if level > 0 {
                    let mut rect = fragment.rect;
                    rect.y1 = rect.y0 + fragment.used_rect.height();
                    placements.push(self.place(
                        MarkedLine {
                            text_range: range.clone(),
                            rect,
                            style,
                            font: self.font_at(text, range.start),
                            color: text.color_at(range.start),
                            level,
                            index,
                            previous_level,
                        },
                        value,
                    ));
                }
            } else {
                log::trace!("no marker for continuation line {range:?}");
            }
            last_line = Some((fragment.rect, style));
            state.previous_level = level;
        }

        if let Some((last_rect, style)) = last_line {
            let trailing = self.trailing_line(text, &region, level, last_rect, style, state);
            if let Some(line) = trailing {
                placements.push(self.place(line, value));
            }
        }
    }

    /// The marked line after a region that ends with a line break.
    ///
    /// Layouts report no fragment for the empty line after a final line break, so it is placed
    /// one line below the last fragment. There is none when the region does not end with an item
    /// ending line break, or when the text after the region is not a continuation at the same
    /// level. Counters are left untouched.
    fn trailing_line<'s>(
        &'s self,
        text: &'s RichText,
        region: &Range<usize>,
        level: usize,
        last_rect: Rect,
        style: &'s ParagraphStyle,
        state: &mut ScanState,
    ) -> Option<MarkedLine<'s>> {
        let unit = self.formatting.indentation;
        let last = region.end - 1;
        if text.len() <= 1 || !text.is_line_break_at(last) || text.skips_marker_at(last) {
            return None;
        }
        if region.end < text.len() {
            if text.list_value_at(region.end).is_some() {
                return None;
            }
            let following = text
                .paragraph_style_at(region.end)
                .unwrap_or(&self.formatting.default_paragraph_style)
                .first_line_level(unit);
            if following != level {
                log::trace!("no trailing marker before level {following} text");
                return None;
            }
        }
        if level == 0 {
            return None;
        }

        let previous_level = self.level_before(text, region.end);
        let index = state.peek(text.list_identity_at(last), level, previous_level);
        state.previous_level = level;
        Some(MarkedLine {
            text_range: region.end..region.end,
            rect: Rect::from_origin_size((last_rect.x0, last_rect.y1), last_rect.size()).expand(),
            style,
            font: self.font_at(text, last),
            color: text.color_at(last),
            level,
            index,
            previous_level,
        })
    }

    fn place(&self, line: MarkedLine<'_>, value: &ListValue) -> MarkerPlacement {
        let MarkedLine {
            text_range,
            rect,
            style,
            font,
            color,
            level,
            index,
            previous_level,
        } = line;
        let marker = self.lookup.marker(index, level, previous_level, Some(value));
        let inset = self.formatting.container_inset;
        let marker_rect = match &marker {
            Marker::Text(marker_text) => {
                let marker_font = marker_text.font.as_ref().unwrap_or(&font);
                let size = self.measurer.measure(&marker_text.text, marker_font);
                geometry::text_marker_rect(size, rect, inset, style)
            }
            Marker::Image { size, .. } => geometry::image_marker_rect(*size, rect, inset, style),
        };
        let marker_rect =
            marker_rect + Vec2::new(0.0, geometry::line_height_offset(rect.height(), style));
        log::trace!("marker {marker:?} for {text_range:?}: level {level}, index {index}");
        MarkerPlacement {
            text_range,
            line_rect: rect,
            marker_rect,
            marker,
            font,
            color: color.unwrap_or(self.formatting.text_color),
            level,
            index,
            previous_level,
        }
    }

    fn font_at(&self, text: &RichText, index: usize) -> TextFont {
        text.font_at(index)
            .cloned()
            .unwrap_or_else(|| self.formatting.default_font.clone())
    }

    /// Level of the paragraph the character before `index` belongs to, 0 at the start.
    fn level_before(&self, text: &RichText, index: usize) -> usize {
        index
            .checked_sub(1)
            .and_then(|before| text.paragraph_style_at(before))
            .map_or(0, |style| style.first_line_level(self.formatting.indentation))
    }
}

impl<L, M: core::fmt::Debug> core::fmt::Debug for MarkerNumbering<'_, L, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarkerNumbering")
            .field("formatting", self.formatting)
            .field("measurer", &self.measurer)
            .finish_non_exhaustive()
    }
}

/// The byte range of every list region in `text`, with its tag.
pub fn list_regions(text: &RichText) -> Vec<(TextRange, &ListValue)> {
    text.runs(text.full_range(), TextAttribute::as_list_value)
        .filter_map(|(range, value)| Some((TextRange::new_unchecked(range.start, range.end), value?)))
        .collect()
}
