// Copyright 2026 the Facsimile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solid colors in RGB, HSB and gray representations.
//!
//! Every representation carries an `alpha` channel and can be normalized
//! into any other with [`Color::to_rgb`], [`Color::to_hsb`] and
//! [`Color::to_gray`]. All channels are in `0.0..=1.0` except
//! [`HsbColor::hue`], which is in degrees.

use core::fmt;
use core::str::FromStr;

use crate::canonical::{Canonical, write_number};

/// Luma weights used when collapsing RGB to gray.
const LUMA: [f64; 3] = [0.2989, 0.587, 0.114];

/// A color in the red / green / blue representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbColor {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
    /// Opacity.
    pub alpha: f64,
}

/// A color in the hue / saturation / brightness representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HsbColor {
    /// Hue in degrees, `0.0..360.0`.
    pub hue: f64,
    /// Saturation.
    pub saturation: f64,
    /// Brightness.
    pub brightness: f64,
    /// Opacity.
    pub alpha: f64,
}

/// A gray level, `0.0` black and `1.0` white.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayColor {
    /// Gray level.
    pub gray: f64,
    /// Opacity.
    pub alpha: f64,
}

/// A solid color in one of the supported representations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Red / green / blue.
    Rgb(RgbColor),
    /// Hue / saturation / brightness.
    Hsb(HsbColor),
    /// Gray level.
    Gray(GrayColor),
}

impl RgbColor {
    /// Creates an opaque RGB color.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Returns `self` with the given alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

impl HsbColor {
    /// Creates an opaque HSB color.
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha: 1.0,
        }
    }
}

impl GrayColor {
    /// Creates an opaque gray.
    #[must_use]
    pub const fn new(gray: f64) -> Self {
        Self { gray, alpha: 1.0 }
    }
}

impl Color {
    /// Returns the alpha channel of any representation.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        match self {
            Self::Rgb(c) => c.alpha,
            Self::Hsb(c) => c.alpha,
            Self::Gray(c) => c.alpha,
        }
    }

    /// Normalizes into the RGB representation.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        match *self {
            Self::Rgb(c) => c,
            Self::Hsb(c) => hsb_to_rgb(c),
            Self::Gray(c) => RgbColor {
                red: c.gray,
                green: c.gray,
                blue: c.gray,
                alpha: c.alpha,
            },
        }
    }

    /// Normalizes into the HSB representation.
    #[must_use]
    pub fn to_hsb(&self) -> HsbColor {
        match *self {
            Self::Hsb(c) => c,
            Self::Rgb(c) => rgb_to_hsb(c),
            Self::Gray(c) => HsbColor {
                hue: 0.0,
                saturation: 0.0,
                brightness: c.gray,
                alpha: c.alpha,
            },
        }
    }

    /// Normalizes into the gray representation using luma weights.
    #[must_use]
    pub fn to_gray(&self) -> GrayColor {
        match *self {
            Self::Gray(c) => c,
            _ => {
                let rgb = self.to_rgb();
                GrayColor {
                    gray: rgb.red * LUMA[0] + rgb.green * LUMA[1] + rgb.blue * LUMA[2],
                    alpha: rgb.alpha,
                }
            }
        }
    }
}

impl From<RgbColor> for Color {
    fn from(c: RgbColor) -> Self {
        Self::Rgb(c)
    }
}

impl From<HsbColor> for Color {
    fn from(c: HsbColor) -> Self {
        Self::Hsb(c)
    }
}

impl From<GrayColor> for Color {
    fn from(c: GrayColor) -> Self {
        Self::Gray(c)
    }
}

fn rgb_to_hsb(c: RgbColor) -> HsbColor {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    let delta = max - min;
    let hue = if delta == 0.0 {
        0.0
    } else if max == c.red {
        (c.green - c.blue) / delta + if c.green < c.blue { 6.0 } else { 0.0 }
    } else if max == c.green {
        (c.blue - c.red) / delta + 2.0
    } else {
        (c.red - c.green) / delta + 4.0
    };
    HsbColor {
        hue: hue * 60.0,
        saturation: if max == 0.0 { 0.0 } else { delta / max },
        brightness: max,
        alpha: c.alpha,
    }
}

fn hsb_to_rgb(c: HsbColor) -> RgbColor {
    let h = c.hue / 60.0;
    // Wrap into 0..6 so negative and >360 hues land on the same sector.
    let h = h - 6.0 * (h / 6.0).floor();
    let sector = h.floor();
    let f = h - sector;
    let v = c.brightness;
    let p = v * (1.0 - c.saturation);
    let q = v * (1.0 - f * c.saturation);
    let t = v * (1.0 - (1.0 - f) * c.saturation);
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sector is an integral value in 0..6"
    )]
    let (red, green, blue) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    RgbColor {
        red,
        green,
        blue,
        alpha: c.alpha,
    }
}

/// Error returned when parsing a hex color string fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not start with `#`.
    MissingHash,
    /// The string has a length other than `#rgb` or `#rrggbb`.
    InvalidLength(usize),
    /// A character is not a hexadecimal digit.
    InvalidDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => f.write_str("hex color must start with '#'"),
            Self::InvalidLength(len) => {
                write!(f, "hex color must have 3 or 6 digits, found {len}")
            }
            Self::InvalidDigit(c) => write!(f, "invalid hex digit {c:?}"),
        }
    }
}

impl core::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `#rgb` or `#rrggbb` into an opaque RGB color.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ParseColorError::MissingHash)?;
        let mut nibbles = [0_u8; 6];
        let count = digits.chars().count();
        if count != 3 && count != 6 {
            return Err(ParseColorError::InvalidLength(count));
        }
        for (i, c) in digits.chars().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "hex digits are below 16"
            )]
            let n = c.to_digit(16).ok_or(ParseColorError::InvalidDigit(c))? as u8;
            if count == 3 {
                nibbles[i * 2] = n;
                nibbles[i * 2 + 1] = n;
            } else {
                nibbles[i] = n;
            }
        }
        let channel = |i: usize| f64::from(nibbles[i] * 16 + nibbles[i + 1]) / 255.0;
        Ok(Self::Rgb(RgbColor::new(channel(0), channel(2), channel(4))))
    }
}

impl Canonical for Color {
    fn write_canonical(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let (names, values): (&[&str], [f64; 4]) = match self {
            Self::Rgb(c) => (
                &["red", "green", "blue", "alpha"],
                [c.red, c.green, c.blue, c.alpha],
            ),
            Self::Hsb(c) => (
                &["hue", "saturation", "brightness", "alpha"],
                [c.hue, c.saturation, c.brightness, c.alpha],
            ),
            Self::Gray(c) => (&["gray", "alpha"], [c.gray, c.alpha, 0.0, 0.0]),
        };
        out.write_str("{ ")?;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                out.write_str(", ")?;
            }
            out.write_str(name)?;
            out.write_str(": ")?;
            write_number(out, values[i])?;
        }
        out.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parse_six_digit_hex() {
        let c: Color = "#ff0000".parse().unwrap();
        assert_eq!(c, Color::Rgb(RgbColor::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn parse_three_digit_hex() {
        let c: Color = "#0f0".parse().unwrap();
        assert_eq!(c, Color::Rgb(RgbColor::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("ff0000".parse::<Color>(), Err(ParseColorError::MissingHash));
        assert_eq!(
            "#ff00".parse::<Color>(),
            Err(ParseColorError::InvalidLength(4))
        );
        assert_eq!(
            "#ggg".parse::<Color>(),
            Err(ParseColorError::InvalidDigit('g'))
        );
    }

    #[test]
    fn rgb_to_hsb_primaries() {
        let red = Color::Rgb(RgbColor::new(1.0, 0.0, 0.0)).to_hsb();
        assert_eq!(red, HsbColor::new(0.0, 1.0, 1.0));
        let blue = Color::Rgb(RgbColor::new(0.0, 0.0, 1.0)).to_hsb();
        assert!(close(blue.hue, 240.0), "got {blue:?}");
        let magenta = Color::Rgb(RgbColor::new(1.0, 0.0, 1.0)).to_hsb();
        assert!(close(magenta.hue, 300.0), "got {magenta:?}");
    }

    #[test]
    fn hsb_round_trips_through_rgb() {
        let hsb = HsbColor {
            hue: 200.0,
            saturation: 0.4,
            brightness: 0.7,
            alpha: 0.5,
        };
        let back = Color::Rgb(Color::Hsb(hsb).to_rgb()).to_hsb();
        assert!(close(back.hue, hsb.hue), "got {back:?}");
        assert!(close(back.saturation, hsb.saturation), "got {back:?}");
        assert!(close(back.brightness, hsb.brightness), "got {back:?}");
        assert!(close(back.alpha, 0.5), "alpha is preserved");
    }

    #[test]
    fn hue_wraps() {
        let a = Color::Hsb(HsbColor::new(-120.0, 1.0, 1.0)).to_rgb();
        let b = Color::Hsb(HsbColor::new(240.0, 1.0, 1.0)).to_rgb();
        assert!(close(a.red, b.red) && close(a.green, b.green) && close(a.blue, b.blue));
    }

    #[test]
    fn gray_conversions() {
        let white = Color::Rgb(RgbColor::new(1.0, 1.0, 1.0)).to_gray();
        assert!(close(white.gray, 0.9999), "luma weights sum to 0.9999");
        let g = Color::Gray(GrayColor::new(0.25));
        assert_eq!(g.to_rgb(), RgbColor::new(0.25, 0.25, 0.25));
        assert_eq!(g.to_hsb().brightness, 0.25);
    }

    #[test]
    fn canonical_forms() {
        let rgb = Color::Rgb(RgbColor::new(1.0, 0.0, 0.5));
        assert_eq!(rgb.canonical(), "{ red: 1, green: 0, blue: 0.5, alpha: 1 }");
        let gray = Color::Gray(GrayColor {
            gray: 0.5,
            alpha: 0.25,
        });
        assert_eq!(gray.canonical(), "{ gray: 0.5, alpha: 0.25 }");
    }
}
