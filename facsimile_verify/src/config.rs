// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comparator configuration.

/// How gradient paints are treated by the structural comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradientPolicy {
    /// Compare ramp, stops and placement.
    #[default]
    Compare,
    /// Do not compare gradient contents.
    ///
    /// A [`Gap`](crate::Gap) is emitted for every skipped gradient so the
    /// omission shows up in reports.
    Skip,
}

/// Configuration for a [`Checker`](crate::Checker).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompareConfig {
    /// Decimal digits kept when numbers are rounded before comparison.
    pub precision: u32,
    /// Treatment of gradient paints.
    pub gradients: GradientPolicy,
}

impl CompareConfig {
    /// Two decimal digits, gradients compared.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            precision: 2,
            gradients: GradientPolicy::Compare,
        }
    }

    /// Two decimal digits, gradients skipped.
    #[must_use]
    pub const fn solid_paints_only() -> Self {
        Self {
            precision: 2,
            gradients: GradientPolicy::Skip,
        }
    }

    /// Returns a copy with a different precision.
    #[must_use]
    pub const fn with_precision(self, precision: u32) -> Self {
        Self { precision, ..self }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::standard()
    }
}
