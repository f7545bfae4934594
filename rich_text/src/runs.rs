// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesced runs of a single projected attribute.
//!
//! Spans in an [`AttributedText`](crate::AttributedText) may overlap freely. Consumers such as
//! list parsing want a different view: "for each stretch of text, which list item (or which
//! paragraph style) is in effect". [`AttributeRuns`] answers that with a sweep over span
//! boundaries, keeping the set of spans active between two boundaries.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

/// Iterator over maximal ranges with a constant projected value.
///
/// Created by [`AttributedText::runs`](crate::AttributedText::runs).
pub struct AttributeRuns<'a, Attr, V, F> {
    spans: &'a [(Range<usize>, Attr)],
    boundaries: Vec<usize>,
    // (boundary index, span index), sorted by boundary index.
    starts: Vec<(usize, usize)>,
    ends: Vec<(usize, usize)>,
    // Span indices, ascending. The last entry is the most recently applied.
    active: Vec<usize>,
    next_start: usize,
    next_end: usize,
    cursor: usize,
    pending: Option<(Range<usize>, Option<V>)>,
    project: F,
}

impl<'a, Attr, V, F> AttributeRuns<'a, Attr, V, F>
where
    V: PartialEq,
    F: FnMut(&'a Attr) -> Option<V>,
{
    pub(crate) fn new(spans: &'a [(Range<usize>, Attr)], range: Range<usize>, project: F) -> Self {
        let mut boundaries = Vec::with_capacity(2 + spans.len() * 2);
        boundaries.push(range.start);
        boundaries.push(range.end);
        let mut clipped = Vec::new();
        for (index, (span, _)) in spans.iter().enumerate() {
            let start = span.start.max(range.start);
            let end = span.end.min(range.end);
            if start >= end {
                continue;
            }
            boundaries.push(start);
            boundaries.push(end);
            clipped.push((index, start, end));
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let position = |offset: usize| {
            // Every clipped endpoint was pushed above.
            boundaries.partition_point(|&b| b < offset)
        };
        let mut starts = Vec::with_capacity(clipped.len());
        let mut ends = Vec::with_capacity(clipped.len());
        for &(index, start, end) in &clipped {
            starts.push((position(start), index));
            ends.push((position(end), index));
        }
        starts.sort_unstable();
        ends.sort_unstable();

        Self {
            spans,
            boundaries,
            starts,
            ends,
            active: Vec::new(),
            next_start: 0,
            next_end: 0,
            cursor: 0,
            pending: None,
            project,
        }
    }

    /// Advances the sweep by one boundary, returning the next elementary segment.
    fn step(&mut self) -> Option<(Range<usize>, Option<V>)> {
        if self.cursor + 1 >= self.boundaries.len() {
            return None;
        }
        let here = self.cursor;
        while let Some(&(at, index)) = self.ends.get(self.next_end) {
            if at != here {
                break;
            }
            if let Ok(slot) = self.active.binary_search(&index) {
                self.active.remove(slot);
            }
            self.next_end += 1;
        }
        while let Some(&(at, index)) = self.starts.get(self.next_start) {
            if at != here {
                break;
            }
            if let Err(slot) = self.active.binary_search(&index) {
                self.active.insert(slot, index);
            }
            self.next_start += 1;
        }

        let spans = self.spans;
        let project = &mut self.project;
        let value = self
            .active
            .iter()
            .rev()
            .find_map(|&index| project(&spans[index].1));
        let segment = self.boundaries[self.cursor]..self.boundaries[self.cursor + 1];
        self.cursor += 1;
        Some((segment, value))
    }
}

impl<'a, Attr, V, F> Iterator for AttributeRuns<'a, Attr, V, F>
where
    V: PartialEq,
    F: FnMut(&'a Attr) -> Option<V>,
{
    type Item = (Range<usize>, Option<V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((segment, value)) = self.step() else {
                return self.pending.take();
            };
            if let Some((range, current)) = &mut self.pending {
                if *current == value {
                    range.end = segment.end;
                    continue;
                }
            }
            let done = self.pending.replace((segment, value));
            if done.is_some() {
                return done;
            }
        }
    }
}

impl<Attr, V: fmt::Debug, F> fmt::Debug for AttributeRuns<'_, Attr, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeRuns")
            .field("boundaries", &self.boundaries)
            .field("cursor", &self.cursor)
            .field("active", &self.active)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
