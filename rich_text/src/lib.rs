// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich Text is a small crate for owned text carrying overlapping, application-ordered
//! attribute spans.
//!
//! It is the storage layer underneath `rich_list`: attributes are an arbitrary type chosen by
//! the caller, ranges are checked byte ranges ([`TextRange`]), and the effective value of any
//! one kind of attribute can be read back as coalesced runs ([`AttributedText::runs`]).
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod attributed_text;
mod error;
mod runs;
mod text_range;

pub use crate::attributed_text::AttributedText;
pub use crate::error::{Endpoint, Error, ErrorKind};
pub use crate::runs::AttributeRuns;
pub use crate::text_range::TextRange;
