// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path style and compositing attributes.

use alloc::vec::Vec;

use crate::table::PaintKey;

/// How an item is composited onto what lies beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source over.
    #[default]
    Normal,
    /// Multiply.
    Multiply,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Soft light.
    SoftLight,
    /// Hard light.
    HardLight,
    /// Color dodge.
    ColorDodge,
    /// Color burn.
    ColorBurn,
    /// Darken.
    Darken,
    /// Lighten.
    Lighten,
    /// Difference.
    Difference,
    /// Exclusion.
    Exclusion,
    /// Hue.
    Hue,
    /// Saturation.
    Saturation,
    /// Color.
    Color,
    /// Luminosity.
    Luminosity,
    /// Additive.
    Add,
    /// Subtractive.
    Subtract,
    /// Average.
    Average,
    /// Pixel XOR.
    PixelXor,
    /// Negation.
    Negation,
}

/// Shape at the open ends of a stroked path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeCap {
    /// Flat, flush with the endpoint.
    #[default]
    Butt,
    /// Semicircular.
    Round,
    /// Flat, extended by half the stroke width.
    Square,
}

/// Shape at the corners of a stroked path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StrokeJoin {
    /// Sharp, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded.
    Round,
    /// Cut off.
    Bevel,
}

/// The style facet of a stylable item.
///
/// Fill and stroke paints are held as [`PaintKey`]s into the owning
/// project's paint table and are set through
/// [`Project::set_fill_color`](crate::item::Project::set_fill_color) and
/// [`Project::set_stroke_color`](crate::item::Project::set_stroke_color).
/// The remaining attributes are plain values.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub(crate) fill_color: Option<PaintKey>,
    pub(crate) stroke_color: Option<PaintKey>,
    /// Stroke width in item units.
    pub stroke_width: f64,
    /// End cap, `None` when unset.
    pub stroke_cap: Option<StrokeCap>,
    /// Corner join, `None` when unset.
    pub stroke_join: Option<StrokeJoin>,
    /// Offset into the dash pattern.
    pub dash_offset: f64,
    /// Miter length limit, as a multiple of stroke width.
    pub miter_limit: f64,
    /// Whether the stroke overprints.
    pub stroke_overprint: bool,
    /// Whether the fill overprints.
    pub fill_overprint: bool,
    /// Alternating dash and gap lengths, `None` for a solid stroke.
    pub dash_array: Option<Vec<f64>>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: None,
            stroke_color: None,
            stroke_width: 1.0,
            stroke_cap: Some(StrokeCap::Butt),
            stroke_join: Some(StrokeJoin::Miter),
            dash_offset: 0.0,
            miter_limit: 10.0,
            stroke_overprint: false,
            fill_overprint: false,
            dash_array: None,
        }
    }
}

impl Style {
    /// Key of the fill paint, if any.
    #[must_use]
    pub const fn fill_color(&self) -> Option<PaintKey> {
        self.fill_color
    }

    /// Key of the stroke paint, if any.
    #[must_use]
    pub const fn stroke_color(&self) -> Option<PaintKey> {
        self.stroke_color
    }
}
