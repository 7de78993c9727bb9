// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tolerance comparison of numbers.

use crate::checker::Checker;

/// Rounds `value` half-up to `precision` decimal digits.
///
/// Halves round toward positive infinity, so `-2.5` at zero digits becomes
/// `-2.0`. Zero of either sign is returned unchanged and NaN stays NaN.
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    if value == 0.0 {
        return value;
    }
    let scale = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    (value * scale + 0.5).floor() / scale
}

impl Checker<'_> {
    /// Asserts that `a` and `b` agree after rounding to the configured
    /// precision.
    ///
    /// Returns whether the check passed. NaN never compares equal.
    pub fn compare_numbers(&mut self, a: f64, b: f64, message: &str) -> bool {
        let precision = self.config().precision;
        self.equals(round_to(a, precision), round_to(b, precision), message)
    }
}
