// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lists in rich text.
//!
//! A list lives in [`RichText`] as ordinary text: lines tagged with [`TextAttribute::ListItem`],
//! whose paragraph indentation encodes their level. Nothing else is stored. This crate works on
//! that representation:
//!
//! - [`ListParser`] converts between [`ListItem`]s and text.
//! - [`MarkerNumbering`] scans laid out text and decides which lines get a bullet or number,
//!   and which. It is meant to run on every layout pass.
//! - [`MarkerGenerator`]s and [`MarkerLookup`]s produce the markers themselves.
//! - The [`editing`] functions indent, outdent and toggle list lines.
//!
//! ```
//! use rich_list::{
//!     FixedWidthLayout, ListFormatting, ListItem, ListParser, ListValue, MarkerNumbering,
//!     MarkerRegistry,
//! };
//!
//! let items = [
//!     ListItem::plain("Apples", 1, ListValue::Numbered),
//!     ListItem::plain("Pears", 1, ListValue::Numbered),
//! ];
//! let text = ListParser::to_text(&items, ListFormatting::DEFAULT_INDENTATION);
//!
//! let formatting = ListFormatting::default();
//! let registry = MarkerRegistry::with_defaults();
//! let layout = FixedWidthLayout::new(text.as_str(), 40, 8.0, 20.0);
//! let placements = MarkerNumbering::new(&formatting, &registry).scan(&text, &layout);
//!
//! let markers: Vec<_> = placements.iter().filter_map(|p| p.marker.as_text()).collect();
//! assert_eq!(markers, ["1.", "2."]);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library for floating point math.
//! - `libm`: Use `libm` for floating point math when `std` is disabled.
//! - `parley`: Read line fragments from Parley layouts.

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
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rich_list requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod attribute;
mod formatting;
mod item;
mod layout;
mod marker;
mod numbering;
mod parser;

pub mod editing;
pub mod geometry;

#[cfg(feature = "parley")]
mod parley_lines;

#[cfg(test)]
mod tests;

pub use rich_text;

pub use attribute::{
    AttributeKind, ContentType, ListIdentity, ListTextExt, ListValue, ParagraphStyle, RichText,
    TextAttribute, TextFont, BLANK_LINE_FILLER,
};
pub use editing::{EditError, Indentation};
pub use formatting::ListFormatting;
pub use geometry::{ApproximateMeasurer, TextMeasurer};
pub use item::{ListItem, ListItemNode, ParsedListItem};
pub use layout::{FixedWidthLayout, LineFragment, LineFragments};
pub use marker::{
    DefaultMarkerLookup, DiamondBulletMarkers, Marker, MarkerGenerator, MarkerImage,
    MarkerLookup, MarkerRegistry, MarkerText, NumericMarkers, SquareBulletMarkers,
};
pub use numbering::{list_regions, MarkerNumbering, MarkerPlacement, ScanState};
pub use parser::ListParser;
