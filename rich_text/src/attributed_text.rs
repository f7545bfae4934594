// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use crate::runs::AttributeRuns;
use crate::text_range::validate_range;
use crate::{Error, TextRange};

/// An owned string with attributes applied to byte ranges within it.
///
/// Spans may overlap. Lookups that need a single value (see [`effective_at`] and [`runs`])
/// resolve overlaps by application order: the span applied last wins.
///
/// [`effective_at`]: AttributedText::effective_at
/// [`runs`]: AttributedText::runs
#[derive(Clone, Debug, PartialEq)]
pub struct AttributedText<Attr> {
    text: String,
    spans: Vec<(Range<usize>, Attr)>,
}

impl<Attr> AttributedText<Attr> {
    /// Create an `AttributedText` with no attributes applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Borrow the underlying text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Borrow the underlying text. Same as [`as_str`](Self::as_str).
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the underlying text, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the full range of the text.
    #[inline]
    pub fn full_range(&self) -> TextRange {
        TextRange::new_unchecked(0, self.text.len())
    }

    /// Validates a byte `range` against this text.
    #[inline]
    pub fn range(&self, range: Range<usize>) -> Result<TextRange, Error> {
        TextRange::new(&self.text, range)
    }

    /// Apply an `attribute` to a validated `range`.
    #[inline]
    pub fn apply_attribute(&mut self, range: TextRange, attribute: Attr) {
        self.spans.push((range.as_range(), attribute));
    }

    /// Apply an `attribute` to a byte `range`, validating the range first.
    pub fn apply_attribute_bytes(&mut self, range: Range<usize>, attribute: Attr) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        self.spans.push((range, attribute));
        Ok(())
    }

    /// Iterate over all spans in the order they were applied.
    pub fn attributes_iter(&self) -> impl ExactSizeIterator<Item = (&Range<usize>, &Attr)> {
        self.spans.iter().map(|(range, attr)| (range, attr))
    }

    /// Iterate over every attribute whose span contains `index`, in application order.
    pub fn attributes_at(&self, index: usize) -> impl Iterator<Item = &Attr> {
        self.spans
            .iter()
            .filter(move |(range, _)| range.contains(&index))
            .map(|(_, attr)| attr)
    }

    /// Iterate over every attribute whose span overlaps `range`, in application order.
    pub fn attributes_for_range(&self, range: Range<usize>) -> impl Iterator<Item = &Attr> {
        self.spans
            .iter()
            .filter(move |(span, _)| span.start < range.end && span.end > range.start)
            .map(|(_, attr)| attr)
    }

    /// Returns the number of spans applied to the text.
    #[inline]
    pub fn attributes_len(&self) -> usize {
        self.spans.len()
    }

    /// Remove all spans.
    #[inline]
    pub fn clear_attributes(&mut self) {
        self.spans.clear();
    }

    /// Returns the value `project` extracts from the last applied span containing `index`.
    ///
    /// Spans for which `project` returns `None` are ignored, so this answers "what is the
    /// paragraph style at `index`" when `project` picks paragraph styles out of a wider
    /// attribute type.
    pub fn effective_at<'a, V>(
        &'a self,
        index: usize,
        mut project: impl FnMut(&'a Attr) -> Option<V>,
    ) -> Option<V> {
        self.spans
            .iter()
            .rev()
            .filter(|(range, _)| range.contains(&index))
            .find_map(|(_, attr)| project(attr))
    }

    /// Iterate over maximal sub-ranges of `range` over which the projected effective value is
    /// constant.
    ///
    /// Ranges without any matching span are reported with `None`. Adjacent ranges are merged
    /// when their values compare equal, so the yielded ranges are as long as possible.
    pub fn runs<'a, V, F>(&'a self, range: TextRange, project: F) -> AttributeRuns<'a, Attr, V, F>
    where
        V: PartialEq,
        F: FnMut(&'a Attr) -> Option<V>,
    {
        AttributeRuns::new(&self.spans, range.as_range(), project)
    }

    /// Append `text`, applying every attribute in `attributes` to the appended range.
    pub fn push_str(&mut self, text: &str, attributes: impl IntoIterator<Item = Attr>) {
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        for attribute in attributes {
            self.spans.push((start..end, attribute));
        }
    }

    /// Insert `text` at byte offset `at`.
    ///
    /// Spans that strictly contain `at` grow to cover the inserted text. Spans that start at or
    /// after `at` move with the text following them. Spans ending at `at` are left as they are.
    pub fn insert_str(&mut self, at: usize, text: &str) -> Result<(), Error> {
        validate_range(&self.text, &(at..at))?;
        let delta = text.len();
        self.text.insert_str(at, text);
        for (range, _) in &mut self.spans {
            if range.start >= at {
                range.start += delta;
                range.end += delta;
            } else if range.end > at {
                range.end += delta;
            }
        }
        Ok(())
    }
}

impl<Attr> Default for AttributedText<Attr> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<Attr: Clone> AttributedText<Attr> {
    /// Copy a sub-range of this text, keeping the parts of spans that fall inside it.
    ///
    /// Span offsets in the result are relative to `range.start`.
    pub fn slice(&self, range: TextRange) -> Self {
        let Range { start, end } = range.as_range();
        let spans = self
            .spans
            .iter()
            .filter_map(|(span, attr)| {
                let clipped = span.start.max(start)..span.end.min(end);
                (clipped.start < clipped.end)
                    .then(|| (clipped.start - start..clipped.end - start, attr.clone()))
            })
            .collect();
        Self {
            text: String::from(&self.text[start..end]),
            spans,
        }
    }

    /// Append `other`, including its spans, to the end of this text.
    ///
    /// Spans of `other` are applied after the existing ones.
    pub fn append(&mut self, other: &Self) {
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.spans.extend(
            other
                .spans
                .iter()
                .map(|(range, attr)| (range.start + offset..range.end + offset, attr.clone())),
        );
    }

    /// Remove attributes selected by `predicate` from `range`.
    ///
    /// Matching spans that extend past either end of `range` are cut back rather than dropped,
    /// keeping their position in application order.
    pub fn remove_attributes(&mut self, range: TextRange, mut predicate: impl FnMut(&Attr) -> bool) {
        let Range { start, end } = range.as_range();
        if start == end {
            return;
        }
        let mut kept = Vec::with_capacity(self.spans.len());
        for (span, attr) in self.spans.drain(..) {
            let overlaps = span.start < end && span.end > start;
            if !overlaps || !predicate(&attr) {
                kept.push((span, attr));
                continue;
            }
            if span.start < start {
                kept.push((span.start..start, attr.clone()));
            }
            if span.end > end {
                kept.push((end..span.end, attr));
            }
        }
        self.spans = kept;
    }
}
