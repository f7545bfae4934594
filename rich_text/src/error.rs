// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::ops::Range;

/// A byte range that could not be used against a piece of text.
///
/// The error remembers the range the caller asked for and the length of the
/// text at the time, so that messages can be produced without access to the
/// text itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    range: Range<usize>,
    len: usize,
}

/// What was wrong with a range.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// `start > end`.
    InvalidRange,
    /// One of the endpoints lies past the end of the text.
    InvalidBounds,
    /// One of the endpoints splits a UTF-8 encoded character.
    NotOnCharBoundary {
        /// The offending endpoint.
        endpoint: Endpoint,
        /// Byte span of the character that was split.
        char_span: Range<usize>,
    },
}

/// One end of a range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The inclusive start.
    Start,
    /// The exclusive end.
    End,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`len` is the length of the text the range was checked against."
)]
impl Error {
    /// The category of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The range that was rejected.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Length in bytes of the text the range was checked against.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_range(range: Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            range,
            len,
        }
    }

    pub(crate) fn invalid_bounds(range: Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            range,
            len,
        }
    }

    pub(crate) fn not_on_char_boundary(
        text: &str,
        range: Range<usize>,
        endpoint: Endpoint,
    ) -> Self {
        let index = match endpoint {
            Endpoint::Start => range.start,
            Endpoint::End => range.end,
        };
        Self {
            kind: ErrorKind::NotOnCharBoundary {
                endpoint,
                char_span: enclosing_char(text, index),
            },
            len: text.len(),
            range,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Range { start, end } = self.range;
        match &self.kind {
            ErrorKind::InvalidRange => write!(f, "invalid range {start}..{end}: start > end"),
            ErrorKind::InvalidBounds => write!(
                f,
                "range {start}..{end} out of bounds for text of len {}",
                self.len
            ),
            ErrorKind::NotOnCharBoundary {
                endpoint,
                char_span,
            } => {
                let which = match endpoint {
                    Endpoint::Start => "start",
                    Endpoint::End => "end",
                };
                write!(
                    f,
                    "range {start}..{end}: {which} splits the character at {}..{}",
                    char_span.start, char_span.end
                )
            }
        }
    }
}

impl core::error::Error for Error {}

/// Byte span of the character containing `index`.
fn enclosing_char(text: &str, index: usize) -> Range<usize> {
    let index = index.min(text.len());
    let start = (0..=index)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    let end = (index + 1..=text.len())
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(text.len());
    start..end
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, Error, ErrorKind};
    use alloc::string::ToString;

    #[test]
    fn split_character_is_reported_with_its_span() {
        // "é" occupies bytes 0..2.
        let err = Error::not_on_char_boundary("éa", 1..3, Endpoint::Start);
        assert_eq!(
            err.kind(),
            &ErrorKind::NotOnCharBoundary {
                endpoint: Endpoint::Start,
                char_span: 0..2,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("1..3"), "unexpected message: {msg}");
        assert!(msg.contains("start splits"), "unexpected message: {msg}");
    }

    #[test]
    fn bounds_message_mentions_length() {
        let err = Error::invalid_bounds(2..9, 4);
        assert_eq!(err.len(), 4);
        assert!(err.to_string().contains("len 4"));
    }
}
