// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical string serialization.
//!
//! Structural comparisons between an item and its copy are made on these
//! strings rather than on the values themselves, so the format must be
//! stable: two structurally equal values always serialize identically, and
//! values that differ beyond the fifth decimal place serialize differently.
//!
//! | Value | Form |
//! |---|---|
//! | number | rounded to 5 decimals, `-0` printed as `0` |
//! | [`Point`] | `{ x: 1, y: 2 }` |
//! | [`Affine`] | `[[a, c, tx], [b, d, ty]]` |
//! | slice | elements joined with `,` |

use alloc::string::String;
use core::fmt;

use kurbo::{Affine, Point};

/// Values with a canonical string form.
pub trait Canonical {
    /// Writes the canonical form of `self` into `out`.
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Returns the canonical form of `self` as a new string.
    #[must_use]
    fn canonical(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_canonical(&mut out);
        out
    }
}

/// Formats a number the way every canonical form does.
///
/// The value is rounded to 5 decimal places; integral values print without a
/// fractional part and negative zero prints as `0`. `NaN` prints as `NaN`.
pub fn write_number(out: &mut dyn fmt::Write, value: f64) -> fmt::Result {
    let rounded = (value * 100_000.0).round() / 100_000.0;
    if rounded == 0.0 {
        out.write_char('0')
    } else {
        write!(out, "{rounded}")
    }
}

impl Canonical for f64 {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_number(out, *self)
    }
}

impl Canonical for Point {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str("{ x: ")?;
        write_number(out, self.x)?;
        out.write_str(", y: ")?;
        write_number(out, self.y)?;
        out.write_str(" }")
    }
}

impl Canonical for Affine {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let [a, b, c, d, tx, ty] = self.as_coeffs();
        out.write_str("[[")?;
        write_number(out, a)?;
        out.write_str(", ")?;
        write_number(out, c)?;
        out.write_str(", ")?;
        write_number(out, tx)?;
        out.write_str("], [")?;
        write_number(out, b)?;
        out.write_str(", ")?;
        write_number(out, d)?;
        out.write_str(", ")?;
        write_number(out, ty)?;
        out.write_str("]]")
    }
}

impl<T: Canonical> Canonical for [T] {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            value.write_canonical(out)?;
        }
        Ok(())
    }
}

impl<T: Canonical> Canonical for alloc::vec::Vec<T> {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.as_slice().write_canonical(out)
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        (**self).write_canonical(out)
    }
}
