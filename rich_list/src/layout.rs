// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The numbering engine's view of laid out text.

use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::Rect;

/// One visual line of laid out text.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment {
    /// The full line box, spanning the width of the text container.
    pub rect: Rect,
    /// The part of the line box covered by glyphs.
    pub used_rect: Rect,
    /// Byte range of the text on the line, including a terminating line break.
    pub text_range: Range<usize>,
}

/// A source of line fragments in visual order.
pub trait LineFragments {
    /// The fragments whose text range shares at least one byte with `range`.
    ///
    /// An empty `range` selects nothing, and neither does an empty fragment.
    fn line_fragments(&self, range: Range<usize>) -> impl Iterator<Item = LineFragment> + '_;
}

impl<T: LineFragments + ?Sized> LineFragments for &T {
    fn line_fragments(&self, range: Range<usize>) -> impl Iterator<Item = LineFragment> + '_ {
        (**self).line_fragments(range)
    }
}

impl LineFragments for [LineFragment] {
    fn line_fragments(&self, range: Range<usize>) -> impl Iterator<Item = LineFragment> + '_ {
        self.iter()
            .filter(move |line| intersects(&line.text_range, &range))
            .cloned()
    }
}

/// A monospace layout with a fixed number of columns.
///
/// Hard breaks at `'\n'` and wraps lines longer than the column count. Every character is one
/// column wide, so this is only meant for tests and for hosts that lay out a terminal grid.
/// Like most text layouts, the empty line after a final line break gets no fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedWidthLayout {
    lines: Vec<LineFragment>,
}

impl FixedWidthLayout {
    /// Lays out `text`.
    ///
    /// A `columns` of 0 disables wrapping.
    pub fn new(text: &str, columns: usize, char_width: f64, line_height: f64) -> Self {
        let mut builder = Builder {
            lines: Vec::new(),
            width: f64::from(u32::try_from(columns).unwrap_or(u32::MAX)) * char_width,
            char_width,
            line_height,
        };
        let mut start = 0;
        for (at, _) in text.match_indices('\n') {
            builder.hard_line(text, start, at + 1, columns);
            start = at + 1;
        }
        if start < text.len() {
            builder.hard_line(text, start, text.len(), columns);
        }
        Self {
            lines: builder.lines,
        }
    }

    /// All fragments in visual order.
    pub fn lines(&self) -> &[LineFragment] {
        &self.lines
    }
}

impl LineFragments for FixedWidthLayout {
    fn line_fragments(&self, range: Range<usize>) -> impl Iterator<Item = LineFragment> + '_ {
        self.lines.as_slice().line_fragments(range)
    }
}

struct Builder {
    lines: Vec<LineFragment>,
    width: f64,
    char_width: f64,
    line_height: f64,
}

impl Builder {
    /// Wraps `text[start..end]`, which ends with its line break if it has one.
    fn hard_line(&mut self, text: &str, start: usize, end: usize, columns: usize) {
        let line = &text[start..end];
        let mut chunk_start = start;
        let mut count = 0;
        for (offset, ch) in line.char_indices() {
            if ch == '\n' {
                break;
            }
            if columns > 0 && count == columns {
                self.push(chunk_start..start + offset, count);
                chunk_start = start + offset;
                count = 0;
            }
            count += 1;
        }
        self.push(chunk_start..end, count);
    }

    fn push(&mut self, text_range: Range<usize>, columns: usize) {
        let top = self.lines.last().map_or(0.0, |line| line.rect.y1);
        let bottom = top + self.line_height;
        let used = f64::from(u32::try_from(columns).unwrap_or(u32::MAX)) * self.char_width;
        self.lines.push(LineFragment {
            rect: Rect::new(0.0, top, self.width.max(used), bottom),
            used_rect: Rect::new(0.0, top, used, bottom),
            text_range,
        });
    }
}

/// Whether the half-open ranges share at least one byte. Empty ranges share none.
pub(crate) fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start.max(b.start) < a.end.min(b.end)
}
