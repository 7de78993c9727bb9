// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component-wise comparators built on [`Checker::compare_numbers`].
//!
//! Each comparator checks one field at a time and suffixes the message with
//! the field name, so `compare_points(a, b, "position")` records
//! `"position x"` and `"position y"`. Colors are first normalized into the
//! comparator's representation, whatever form they arrive in.

use facsimile_scene::canonical::Canonical;
use facsimile_scene::color::Color;
use facsimile_scene::paint::GradientColor;
use kurbo::{Point, Rect};

use crate::checker::Checker;

impl Checker<'_> {
    /// Compares `x` then `y`.
    pub fn compare_points(&mut self, a: Point, b: Point, message: &str) {
        self.compare_numbers(a.x, b.x, &format!("{message} x"));
        self.compare_numbers(a.y, b.y, &format!("{message} y"));
    }

    /// Compares origin `x`, `y`, then `width` and `height`.
    pub fn compare_rectangles(&mut self, a: Rect, b: Rect, message: &str) {
        self.compare_numbers(a.x0, b.x0, &format!("{message} x"));
        self.compare_numbers(a.y0, b.y0, &format!("{message} y"));
        self.compare_numbers(a.width(), b.width(), &format!("{message} width"));
        self.compare_numbers(a.height(), b.height(), &format!("{message} height"));
    }

    /// Compares both colors as RGB, alpha included.
    pub fn compare_rgb_colors(&mut self, a: impl Into<Color>, b: impl Into<Color>, message: &str) {
        let (a, b) = (a.into().to_rgb(), b.into().to_rgb());
        self.compare_numbers(a.red, b.red, &format!("{message} red"));
        self.compare_numbers(a.green, b.green, &format!("{message} green"));
        self.compare_numbers(a.blue, b.blue, &format!("{message} blue"));
        self.compare_numbers(a.alpha, b.alpha, &format!("{message} alpha"));
    }

    /// Compares both colors as HSB, alpha included.
    pub fn compare_hsb_colors(&mut self, a: impl Into<Color>, b: impl Into<Color>, message: &str) {
        let (a, b) = (a.into().to_hsb(), b.into().to_hsb());
        self.compare_numbers(a.hue, b.hue, &format!("{message} hue"));
        self.compare_numbers(a.saturation, b.saturation, &format!("{message} saturation"));
        self.compare_numbers(a.brightness, b.brightness, &format!("{message} brightness"));
        self.compare_numbers(a.alpha, b.alpha, &format!("{message} alpha"));
    }

    /// Compares the gray level only.
    pub fn compare_gray_colors(&mut self, a: impl Into<Color>, b: impl Into<Color>, message: &str) {
        let (a, b) = (a.into().to_gray(), b.into().to_gray());
        self.compare_numbers(a.gray, b.gray, &format!("{message} gray"));
    }

    /// Compares two placed gradients.
    ///
    /// The radial flag and stop count must match exactly. Stops are then
    /// compared pairwise, offsets with tolerance and colors by canonical
    /// form. Origin and destination go through
    /// [`compare_points`](Self::compare_points); the optional highlight is
    /// compared by canonical form.
    pub fn compare_gradients(&mut self, a: &GradientColor, b: &GradientColor, message: &str) {
        self.equals(a.gradient.radial, b.gradient.radial, &format!("{message} radial"));
        self.equals(
            a.gradient.stops.len(),
            b.gradient.stops.len(),
            &format!("{message} stops.len()"),
        );
        for (i, (sa, sb)) in a.gradient.stops.iter().zip(&b.gradient.stops).enumerate() {
            self.compare_numbers(sa.offset, sb.offset, &format!("{message} stops[{i}] offset"));
            self.equals(
                sa.color.canonical(),
                sb.color.canonical(),
                &format!("{message} stops[{i}] color"),
            );
        }
        self.compare_points(a.origin, b.origin, &format!("{message} origin"));
        self.compare_points(a.destination, b.destination, &format!("{message} destination"));
        self.equals(
            a.highlight.map(|h| h.canonical()),
            b.highlight.map(|h| h.canonical()),
            &format!("{message} highlight"),
        );
    }
}
