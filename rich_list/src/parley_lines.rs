// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use parley::layout::LineMetrics;
use parley::style::Brush;
use parley::Layout;
use peniko::kurbo::Rect;

use crate::layout::intersects;
use crate::{LineFragment, LineFragments};

/// Lines of a Parley layout.
///
/// The line box spans the layout width. The used rect spans the line's advance, starting at its
/// alignment offset.
impl<B: Brush> LineFragments for Layout<B> {
    fn line_fragments(&self, range: Range<usize>) -> impl Iterator<Item = LineFragment> + '_ {
        let lines = self
            .lines()
            .map(|line| (line.text_range(), *line.metrics()));
        select_lines(lines, self.width(), range)
    }
}

/// Fragments of the `lines` that share a byte with `range`.
fn select_lines(
    lines: impl Iterator<Item = (Range<usize>, LineMetrics)>,
    width: f32,
    range: Range<usize>,
) -> impl Iterator<Item = LineFragment> {
    lines
        .filter(move |(text_range, _)| intersects(text_range, &range))
        .map(move |(text_range, metrics)| line_fragment(width, text_range, &metrics))
}

fn line_fragment(width: f32, text_range: Range<usize>, metrics: &LineMetrics) -> LineFragment {
    let top = f64::from(metrics.min_coord);
    let bottom = f64::from(metrics.max_coord);
    let start = f64::from(metrics.offset);
    let end = start + f64::from(metrics.advance);
    LineFragment {
        rect: Rect::new(0.0, top, f64::from(width).max(end), bottom),
        used_rect: Rect::new(start, top, end, bottom),
        text_range,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::ops::Range;

    use parley::layout::LineMetrics;
    use parley::Layout;
    use peniko::kurbo::Rect;

    use super::{line_fragment, select_lines};
    use crate::LineFragments;

    fn metrics(top: f32, bottom: f32, offset: f32, advance: f32) -> LineMetrics {
        LineMetrics {
            min_coord: top,
            max_coord: bottom,
            offset,
            advance,
            ..Default::default()
        }
    }

    #[test]
    fn line_metrics_map_to_rects() {
        let fragment = line_fragment(100.0, 0..4, &metrics(10.0, 30.0, 5.0, 40.0));
        assert_eq!(fragment.text_range, 0..4);
        assert_eq!(fragment.rect, Rect::new(0.0, 10.0, 100.0, 30.0));
        assert_eq!(fragment.used_rect, Rect::new(5.0, 10.0, 45.0, 30.0));
    }

    #[test]
    fn overlong_lines_widen_the_line_box() {
        let fragment = line_fragment(30.0, 0..4, &metrics(0.0, 20.0, 0.0, 50.0));
        assert_eq!(fragment.rect.x1, 50.0, "line box covers the advance");
    }

    #[test]
    fn empty_line_after_a_final_break_is_skipped() {
        // "ab\ncd\n" lays out as two lines and an empty third one.
        let lines = [
            (0..3, metrics(0.0, 20.0, 0.0, 20.0)),
            (3..6, metrics(20.0, 40.0, 0.0, 20.0)),
            (6..6, metrics(40.0, 60.0, 0.0, 0.0)),
        ];
        let ranges: Vec<Range<usize>> = select_lines(lines.clone().into_iter(), 100.0, 0..6)
            .map(|fragment| fragment.text_range)
            .collect();
        assert_eq!(ranges, [0..3, 3..6]);

        let second: Vec<Rect> = select_lines(lines.into_iter(), 100.0, 4..5)
            .map(|fragment| fragment.rect)
            .collect();
        assert_eq!(second, [Rect::new(0.0, 20.0, 100.0, 40.0)]);
    }

    #[test]
    fn unbuilt_layout_has_no_fragments() {
        let layout = Layout::<[u8; 4]>::new();
        assert_eq!(layout.line_fragments(0..1).count(), 0);
    }
}
