// Copyright 2025 the Rich List Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List markers and the ways of choosing them.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use peniko::kurbo::Size;
use peniko::{Blob, Color};

use crate::{ListValue, TextFont};

/// What to draw in front of a list line.
#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    /// A text fragment, such as `"3."` or a bullet glyph.
    Text(MarkerText),
    /// An image drawn at `size`.
    Image {
        /// The image.
        image: MarkerImage,
        /// Target size in layout units, before any scaling to fit the line.
        size: Size,
    },
}

impl Marker {
    /// A text marker drawn in the font of the line it belongs to.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(MarkerText::new(text))
    }

    /// An image marker.
    pub fn image(image: MarkerImage, size: Size) -> Self {
        Self::Image { image, size }
    }

    /// The text of a text marker.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&text.text),
            Self::Image { .. } => None,
        }
    }
}

impl Default for Marker {
    /// An asterisk.
    fn default() -> Self {
        Self::text("*")
    }
}

/// The text of a [`Marker::Text`].
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerText {
    /// The text.
    pub text: String,
    /// Font override. `None` uses the font of the line.
    pub font: Option<TextFont>,
}

impl MarkerText {
    /// Text drawn in the font of the line.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }

    /// Returns this text with a font override.
    #[must_use]
    pub fn with_font(mut self, font: TextFont) -> Self {
        self.font = Some(font);
        self
    }
}

/// RGBA8 pixels of a [`Marker::Image`], unpremultiplied, row major.
///
/// Equality compares the identity of the underlying blob rather than the pixels.
#[derive(Clone)]
pub struct MarkerImage {
    data: Blob<u8>,
    width: u32,
    height: u32,
}

impl MarkerImage {
    /// Wraps `data` as a `width` by `height` image.
    ///
    /// Returns `None` if the length of `data` is not `width * height * 4`.
    pub fn new(data: Blob<u8>, width: u32, height: u32) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (data.data().len() == expected).then_some(Self {
            data,
            width,
            height,
        })
    }

    /// A `width` by `height` image of a single color.
    ///
    /// Returns `None` if the pixel data would not fit in memory.
    pub fn solid(color: Color, width: u32, height: u32) -> Option<Self> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        pixels.checked_mul(4)?;
        Some(Self::filled(color, width, height, pixels))
    }

    /// `pixels` must be `width * height` and fit in memory four times over.
    fn filled(color: Color, width: u32, height: u32, pixels: usize) -> Self {
        let data = color.to_rgba8().to_u8_array().repeat(pixels);
        Self {
            data: Blob::new(Arc::new(data)),
            width,
            height,
        }
    }

    /// The pixel data.
    pub fn data(&self) -> &Blob<u8> {
        &self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl PartialEq for MarkerImage {
    fn eq(&self, other: &Self) -> bool {
        self.data.id() == other.data.id() && self.width == other.width && self.height == other.height
    }
}

impl fmt::Debug for MarkerImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerImage")
            .field("blob", &self.data.id())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Produces the marker for the line at a position within its level.
pub trait MarkerGenerator {
    /// The marker for the item at 0-based `index`.
    fn value_at(&self, index: usize) -> Marker;
}

impl<F: Fn(usize) -> Marker> MarkerGenerator for F {
    fn value_at(&self, index: usize) -> Marker {
        self(index)
    }
}

/// The same marker at every index.
impl MarkerGenerator for Marker {
    fn value_at(&self, _index: usize) -> Marker {
        self.clone()
    }
}

/// `"1."`, `"2."`, ...
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumericMarkers {
    /// Font override for the numbers.
    pub font: Option<TextFont>,
}

impl MarkerGenerator for NumericMarkers {
    fn value_at(&self, index: usize) -> Marker {
        Marker::Text(MarkerText {
            text: format!("{}.", index + 1),
            font: self.font.clone(),
        })
    }
}

/// A diamond glyph, `"◈"`, at every index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiamondBulletMarkers {
    /// Font override for the glyph.
    pub font: Option<TextFont>,
}

impl MarkerGenerator for DiamondBulletMarkers {
    fn value_at(&self, _index: usize) -> Marker {
        Marker::Text(MarkerText {
            text: "◈".into(),
            font: self.font.clone(),
        })
    }
}

/// A small filled square image at every index.
#[derive(Clone, Debug, PartialEq)]
pub struct SquareBulletMarkers {
    image: MarkerImage,
    size: Size,
}

impl SquareBulletMarkers {
    /// Edge length of the square, in pixels and in layout units.
    pub const EDGE: u32 = 5;

    /// Squares of `color`.
    pub fn new(color: Color) -> Self {
        Self {
            image: MarkerImage::filled(
                color,
                Self::EDGE,
                Self::EDGE,
                Self::EDGE as usize * Self::EDGE as usize,
            ),
            size: Size::new(f64::from(Self::EDGE), f64::from(Self::EDGE)),
        }
    }
}

impl Default for SquareBulletMarkers {
    fn default() -> Self {
        Self::new(peniko::color::palette::css::BLACK)
    }
}

impl MarkerGenerator for SquareBulletMarkers {
    fn value_at(&self, _index: usize) -> Marker {
        Marker::Image {
            image: self.image.clone(),
            size: self.size,
        }
    }
}

/// Chooses the marker for a list line.
///
/// Called once per marked line with the line's 0-based `index` within its level (or within its
/// list identity), its `level`, the level of the line before it, and the list membership tag of
/// the list being drawn.
pub trait MarkerLookup {
    /// The marker to draw.
    fn marker(
        &self,
        index: usize,
        level: usize,
        previous_level: usize,
        value: Option<&ListValue>,
    ) -> Marker;
}

impl<F> MarkerLookup for F
where
    F: Fn(usize, usize, usize, Option<&ListValue>) -> Marker,
{
    fn marker(
        &self,
        index: usize,
        level: usize,
        previous_level: usize,
        value: Option<&ListValue>,
    ) -> Marker {
        self(index, level, previous_level, value)
    }
}

/// A lookup that always answers with the default asterisk marker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultMarkerLookup;

impl MarkerLookup for DefaultMarkerLookup {
    fn marker(&self, _: usize, _: usize, _: usize, _: Option<&ListValue>) -> Marker {
        Marker::default()
    }
}

/// Marker generators registered per [`ListValue`], with a fallback for everything else.
pub struct MarkerRegistry {
    generators: HashMap<ListValue, Box<dyn MarkerGenerator>>,
    fallback: Box<dyn MarkerGenerator>,
}

impl MarkerRegistry {
    /// A registry with no generators and an asterisk fallback.
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
            fallback: Box::new(Marker::default()),
        }
    }

    /// A registry with [`NumericMarkers`] for [`ListValue::Numbered`] and
    /// [`DiamondBulletMarkers`] for [`ListValue::Bulleted`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ListValue::Numbered, NumericMarkers::default());
        registry.register(ListValue::Bulleted, DiamondBulletMarkers::default());
        registry
    }

    /// Registers `generator` for lists tagged with `value`, returning the one it replaces.
    pub fn register(
        &mut self,
        value: ListValue,
        generator: impl MarkerGenerator + 'static,
    ) -> Option<Box<dyn MarkerGenerator>> {
        self.generators.insert(value, Box::new(generator))
    }

    /// Removes the generator for `value`.
    pub fn unregister(&mut self, value: &ListValue) -> Option<Box<dyn MarkerGenerator>> {
        self.generators.remove(value)
    }

    /// Replaces the generator used for unregistered values.
    pub fn set_fallback(&mut self, generator: impl MarkerGenerator + 'static) {
        self.fallback = Box::new(generator);
    }

    /// Whether a generator is registered for `value`.
    pub fn contains(&self, value: &ListValue) -> bool {
        self.generators.contains_key(value)
    }
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerLookup for MarkerRegistry {
    fn marker(
        &self,
        index: usize,
        _level: usize,
        _previous_level: usize,
        value: Option<&ListValue>,
    ) -> Marker {
        let generator = match value.and_then(|value| self.generators.get(value)) {
            Some(generator) => generator,
            None => {
                if let Some(value) = value {
                    log::trace!("no marker generator for {value:?}, using fallback");
                }
                &self.fallback
            }
        };
        generator.value_at(index)
    }
}

impl fmt::Debug for MarkerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerRegistry")
            .field("values", &self.generators.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
