// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variant-specific attribute groups.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::canonical::Canonical;

/// One anchor of a path, with its Bézier handles relative to the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    /// Anchor point.
    pub point: Point,
    /// Incoming handle, relative to `point`.
    pub handle_in: Vec2,
    /// Outgoing handle, relative to `point`.
    pub handle_out: Vec2,
}

impl Segment {
    /// A corner segment with zero-length handles.
    #[must_use]
    pub const fn corner(point: Point) -> Self {
        Self {
            point,
            handle_in: Vec2::ZERO,
            handle_out: Vec2::ZERO,
        }
    }

    /// A smooth segment.
    #[must_use]
    pub const fn smooth(point: Point, handle_in: Vec2, handle_out: Vec2) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }
}

impl Canonical for Segment {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{ point: ")?;
        self.point.write_canonical(out)?;
        if self.handle_in != Vec2::ZERO {
            out.write_str(", handleIn: ")?;
            self.handle_in.to_point().write_canonical(out)?;
        }
        if self.handle_out != Vec2::ZERO {
            out.write_str(", handleOut: ")?;
            self.handle_out.to_point().write_canonical(out)?;
        }
        out.write_str(" }")
    }
}

/// Geometry of a path-like item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathFacet {
    /// Segments in drawing order. Empty for compound paths, whose geometry
    /// lives in their children.
    pub segments: Vec<Segment>,
    /// Cached orientation.
    pub clockwise: bool,
}

/// Horizontal alignment of a text paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justification {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Character-level text attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterStyle {
    /// Font size in points.
    pub font_size: f64,
    /// Font family name.
    pub font: String,
}

impl Default for CharacterStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font: String::from("sans-serif"),
        }
    }
}

/// Paragraph-level text attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParagraphStyle {
    /// Alignment.
    pub justification: Justification,
}

/// Content and styling of a text item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextFacet {
    /// The text.
    pub content: String,
    /// Character attributes.
    pub character_style: CharacterStyle,
    /// Paragraph attributes.
    pub paragraph_style: ParagraphStyle,
}
