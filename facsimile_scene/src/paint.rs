// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill and stroke paints.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::canonical::{Canonical, write_number};
use crate::color::Color;

/// One color stop of a [`Gradient`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Stop color.
    pub color: Color,
    /// Position along the gradient ramp, `0.0..=1.0`.
    pub offset: f64,
}

/// An ordered color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Stops in ramp order.
    pub stops: Vec<GradientStop>,
    /// Whether the ramp is radial rather than linear.
    pub radial: bool,
}

/// A gradient placed in item space.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientColor {
    /// The color ramp.
    pub gradient: Gradient,
    /// Start of the ramp (center for radial gradients).
    pub origin: Point,
    /// End of the ramp (edge for radial gradients).
    pub destination: Point,
    /// Focal point of a radial gradient, if offset from the origin.
    pub highlight: Option<Point>,
}

/// What a fill or stroke is painted with.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A solid color.
    Color(Color),
    /// A linear or radial gradient.
    Gradient(GradientColor),
}

impl Paint {
    /// Returns the gradient, if this paint is one.
    #[must_use]
    pub const fn as_gradient(&self) -> Option<&GradientColor> {
        match self {
            Self::Gradient(g) => Some(g),
            Self::Color(_) => None,
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<GradientColor> for Paint {
    fn from(g: GradientColor) -> Self {
        Self::Gradient(g)
    }
}

impl Canonical for GradientStop {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{ color: ")?;
        self.color.write_canonical(out)?;
        out.write_str(", offset: ")?;
        write_number(out, self.offset)?;
        out.write_str(" }")
    }
}

impl Canonical for GradientColor {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{ stops: [")?;
        self.gradient.stops.write_canonical(out)?;
        out.write_str("], radial: ")?;
        out.write_str(if self.gradient.radial { "true" } else { "false" })?;
        out.write_str(", origin: ")?;
        self.origin.write_canonical(out)?;
        out.write_str(", destination: ")?;
        self.destination.write_canonical(out)?;
        if let Some(highlight) = self.highlight {
            out.write_str(", highlight: ")?;
            highlight.write_canonical(out)?;
        }
        out.write_str(" }")
    }
}

impl Canonical for Paint {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Self::Color(c) => c.write_canonical(out),
            Self::Gradient(g) => g.write_canonical(out),
        }
    }
}
