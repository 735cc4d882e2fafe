//! Color types and conversions between HEX, RGBA and HSL.
//!
//! The free functions mirror each other pairwise and never fail: malformed hex input degrades to
//! zeroed channels. Use [`Hex::parse`] or [`str::parse`] for [`Rgba`] when a malformed value
//! should be reported instead.

use crate::{Error, Result};
use std::{fmt, str::FromStr};

/// Maximum length of a [Hex] string, `#RRGGBB`.
pub const HEX_CAPACITY: usize = 7;

/// Approximate equality for floating point color values.
pub trait ApproxEq {
    /// Whether `self` and `rhs` differ by at most `epsilon`.
    fn is_approx_eq(&self, rhs: &Self, epsilon: f32) -> bool;
}

impl ApproxEq for f32 {
    fn is_approx_eq(&self, rhs: &f32, epsilon: f32) -> bool {
        (self - rhs).abs() <= epsilon
    }
}

/// An 8-bit per channel red/green/blue/alpha color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::From, derive_more::Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl Rgba {
    /// Creates an `Rgba` color from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque `Rgba` color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Returns the same color with a different alpha channel.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_hex(self) -> Hex {
        rgba_to_hex(self)
    }

    #[inline]
    pub fn to_hsl(self) -> Hsl {
        rgba_to_hsl(self)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Strictly parses `#RRGGBB` or `RRGGBB` into an opaque color.
    fn from_str(s: &str) -> Result<Self> {
        Hex::parse(s).map(|hex| hex_to_rgba(&hex))
    }
}

impl From<Hsl> for Rgba {
    fn from(hsl: Hsl) -> Self {
        hsl_to_rgba(hsl)
    }
}

impl From<&Hex> for Rgba {
    fn from(hex: &Hex) -> Self {
        hex_to_rgba(hex)
    }
}

impl From<Hex> for Rgba {
    fn from(hex: Hex) -> Self {
        hex_to_rgba(&hex)
    }
}

/// A hue/saturation/lightness color.
///
/// Hue is in degrees and is not normalized on construction, saturation and lightness are in
/// `0.0..=1.0`.
#[derive(Default, Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    #[inline]
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    #[inline]
    pub fn to_rgba(self) -> Rgba {
        hsl_to_rgba(self)
    }

    #[inline]
    pub fn to_hex(self) -> Hex {
        hsl_to_hex(self)
    }
}

impl ApproxEq for Hsl {
    fn is_approx_eq(&self, rhs: &Hsl, epsilon: f32) -> bool {
        self.h.is_approx_eq(&rhs.h, epsilon)
            && self.s.is_approx_eq(&rhs.s, epsilon)
            && self.l.is_approx_eq(&rhs.l, epsilon)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.h,
            self.s * 100.0,
            self.l * 100.0
        )
    }
}

impl From<Rgba> for Hsl {
    fn from(rgba: Rgba) -> Self {
        rgba_to_hsl(rgba)
    }
}

impl From<&Hex> for Hsl {
    fn from(hex: &Hex) -> Self {
        hex_to_hsl(hex)
    }
}

/// A `#RRGGBB` color string holding at most [`HEX_CAPACITY`] characters.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[must_use]
pub struct Hex(String);

impl Hex {
    /// Creates a `Hex` without validating it, truncating anything past [`HEX_CAPACITY`]
    /// characters.
    pub fn new(value: &str) -> Self {
        Self(value.chars().take(HEX_CAPACITY).collect())
    }

    /// Parses exactly six hex digits with an optional leading `#` into canonical uppercase
    /// `#RRGGBB`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHex`] if the value is not six hexadecimal digits.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidHex {
            input: value.to_owned(),
            reason,
        };
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != HEX_CAPACITY - 1 {
            return Err(invalid("expected 6 hexadecimal digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("contains a non-hexadecimal digit"));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn to_rgba(&self) -> Rgba {
        hex_to_rgba(self)
    }

    #[inline]
    pub fn to_hsl(&self) -> Hsl {
        hex_to_hsl(self)
    }
}

impl AsRef<str> for Hex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Hex {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Hex {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Hex> for String {
    fn from(hex: Hex) -> Self {
        hex.0
    }
}

impl From<Rgba> for Hex {
    fn from(rgba: Rgba) -> Self {
        rgba_to_hex(rgba)
    }
}

impl From<Hsl> for Hex {
    fn from(hsl: Hsl) -> Self {
        hsl_to_hex(hsl)
    }
}

impl FromStr for Hex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a `#RRGGBB` string into an opaque [Rgba] color.
///
/// The leading `#` is optional. Each channel reads up to two hex digits and parsing stops at the
/// first channel without one, leaving it and any later channels at zero.
#[must_use]
pub fn hex_to_rgba(hex: impl AsRef<str>) -> Rgba {
    let hex = hex.as_ref();
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let mut channels = [0u8; 3];
    let mut rest = digits.as_bytes();
    for (parsed, channel) in channels.iter_mut().enumerate() {
        let len = rest
            .iter()
            .take(2)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if len == 0 {
            tracing::debug!("hex color {hex:?} stopped parsing after {parsed} channel(s)");
            break;
        }
        *channel = rest[..len]
            .iter()
            .fold(0, |value, &digit| (value << 4) | hex_digit(digit));
        rest = &rest[len..];
    }
    let [r, g, b] = channels;
    Rgba::rgb(r, g, b)
}

#[inline]
fn hex_digit(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Convert an [Rgba] color into uppercase `#RRGGBB`, discarding alpha.
#[inline]
pub fn rgba_to_hex(rgba: Rgba) -> Hex {
    Hex(format!("#{:02X}{:02X}{:02X}", rgba.r, rgba.g, rgba.b))
}

/// Convert an [Rgba] color into [Hsl] with a hue in `0.0..360.0`.
pub fn rgba_to_hsl(rgba: Rgba) -> Hsl {
    let r = f32::from(rgba.r) / 255.0;
    let g = f32::from(rgba.g) / 255.0;
    let b = f32::from(rgba.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, l);
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    #[allow(clippy::float_cmp)]
    let mut h = if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }
    if h >= 360.0 {
        h -= 360.0;
    }
    Hsl::new(h, s, l)
}

/// Convert an [Hsl] color into an opaque [Rgba] color, wrapping hue into `0.0..360.0`.
pub fn hsl_to_rgba(hsl: Hsl) -> Rgba {
    let Hsl { h, s, l } = hsl;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = l - c / 2.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgba::rgb(to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[inline]
fn to_channel(value: f32) -> u8 {
    // Float to int casts saturate, NaN becomes 0.
    (value * 255.0).round() as u8
}

#[inline]
pub fn hex_to_hsl(hex: impl AsRef<str>) -> Hsl {
    rgba_to_hsl(hex_to_rgba(hex))
}

#[inline]
pub fn hsl_to_hex(hsl: Hsl) -> Hex {
    rgba_to_hex(hsl_to_rgba(hsl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgba_red() {
        assert_eq!(hex_to_rgba("#FF0000"), Rgba::new(255, 0, 0, 255));
        assert_eq!(hex_to_rgba("ff0000"), Rgba::new(255, 0, 0, 255));
        assert_eq!(hex_to_rgba(Hex::new("#3AE6F5")), Rgba::rgb(0x3A, 0xE6, 0xF5));
    }

    #[test]
    fn hex_to_rgba_malformed() {
        assert_eq!(hex_to_rgba(""), Rgba::default());
        assert_eq!(hex_to_rgba("#"), Rgba::rgb(0, 0, 0));
        assert_eq!(hex_to_rgba("zzzzzz"), Rgba::rgb(0, 0, 0));
        assert_eq!(hex_to_rgba("#12zz56"), Rgba::rgb(0x12, 0, 0));
        assert_eq!(hex_to_rgba("#1z2233"), Rgba::rgb(0x1, 0, 0));
        assert_eq!(hex_to_rgba("#ABCD"), Rgba::rgb(0xAB, 0xCD, 0));
    }

    #[test]
    fn hex_to_rgba_prefixes_not_skipped() {
        assert_eq!(hex_to_rgba("# FF0000"), Rgba::rgb(0, 0, 0));
        assert_eq!(hex_to_rgba("#FF 0000"), Rgba::rgb(0xFF, 0, 0));
        assert_eq!(hex_to_rgba("0xFF0000"), Rgba::rgb(0, 0, 0));
        assert_eq!(hex_to_rgba("#+F0000"), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn rgba_to_hex_uppercase() {
        assert_eq!(rgba_to_hex(Rgba::rgb(255, 0, 0)).as_str(), "#FF0000");
        assert_eq!(rgba_to_hex(Rgba::new(0x0a, 0xbc, 0x01, 0)).as_str(), "#0ABC01");
    }

    #[test]
    fn hex_round_trip() {
        for (input, expected) in [
            ("#E31D39", "#E31D39"),
            ("F5CB3A", "#F5CB3A"),
            ("#3ae6f5", "#3AE6F5"),
            ("3af547", "#3AF547"),
            ("#000000", "#000000"),
            ("FFFFFF", "#FFFFFF"),
        ] {
            assert_eq!(rgba_to_hex(hex_to_rgba(input)).as_str(), expected);
        }
    }

    #[test]
    fn rgba_to_hsl_red() {
        let hsl = rgba_to_hsl(Rgba::rgb(255, 0, 0));
        assert!(hsl.is_approx_eq(&Hsl::new(0.0, 1.0, 0.5), f32::EPSILON));
        assert_eq!(hsl_to_rgba(Hsl::new(0.0, 1.0, 0.5)), Rgba::new(255, 0, 0, 255));
    }

    #[test]
    fn black() {
        let rgba = hex_to_rgba("#000000");
        assert_eq!(rgba, Rgba::new(0, 0, 0, 255));
        assert_eq!(rgba_to_hsl(rgba), Hsl::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn primary_hues() {
        assert!(rgba_to_hsl(Rgba::rgb(0, 255, 0)).h.is_approx_eq(&120.0, 1e-3));
        assert!(rgba_to_hsl(Rgba::rgb(0, 0, 255)).h.is_approx_eq(&240.0, 1e-3));
        assert!(rgba_to_hsl(Rgba::rgb(255, 0, 255)).h.is_approx_eq(&300.0, 1e-3));
        assert_eq!(hsl_to_rgba(Hsl::new(180.0, 1.0, 0.5)), Rgba::rgb(0, 255, 255));
    }

    #[test]
    fn hsl_hue_wraps() {
        let red = Rgba::rgb(255, 0, 0);
        assert_eq!(hsl_to_rgba(Hsl::new(360.0, 1.0, 0.5)), red);
        assert_eq!(hsl_to_rgba(Hsl::new(720.0, 1.0, 0.5)), red);
        assert_eq!(
            hsl_to_rgba(Hsl::new(-120.0, 1.0, 0.5)),
            hsl_to_rgba(Hsl::new(240.0, 1.0, 0.5))
        );
    }

    #[test]
    fn grayscale_has_no_saturation() {
        for v in [0, 1, 64, 128, 200, 255] {
            let hsl = rgba_to_hsl(Rgba::rgb(v, v, v));
            assert_eq!(hsl.s, 0.0);
            assert_eq!(hsl.h, 0.0);
        }
    }

    #[test]
    fn rgba_hsl_round_trip() {
        let within_one = |a: u8, b: u8| a.abs_diff(b) <= 1;
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(17) {
                for b in (0..=255).step_by(51) {
                    let rgba = Rgba::rgb(r, g, b);
                    let hsl = rgba_to_hsl(rgba);
                    assert!((0.0..360.0).contains(&hsl.h), "hue out of range: {hsl:?}");
                    let back = hsl_to_rgba(hsl);
                    assert!(
                        within_one(back.r, r) && within_one(back.g, g) && within_one(back.b, b),
                        "{rgba} -> {hsl:?} -> {back}"
                    );
                    assert_eq!(back.a, 255);
                }
            }
        }
    }

    #[test]
    fn hex_truncates() {
        assert_eq!(Hex::new("#FF00001234").as_str(), "#FF0000");
        assert_eq!(Hex::from(String::from("abcdefgh")).len(), HEX_CAPACITY);
    }

    #[test]
    fn hex_parse_strict() {
        assert_eq!(Hex::parse("#3af547").expect("valid hex").as_str(), "#3AF547");
        assert_eq!(Hex::parse("E31D39").expect("valid hex").as_str(), "#E31D39");
        assert!(matches!(
            Hex::parse("#12zz56"),
            Err(Error::InvalidHex { .. })
        ));
        assert!(matches!(Hex::parse("#FFF"), Err(Error::InvalidHex { .. })));
        assert_eq!(
            "#F5CB3A".parse::<Rgba>().expect("valid rgba"),
            Rgba::rgb(0xF5, 0xCB, 0x3A)
        );
        assert!("nope".parse::<Rgba>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Rgba::rgb(1, 2, 3).to_string(), "rgba(1, 2, 3, 255)");
        assert_eq!(Hsl::new(120.0, 1.0, 0.25).to_string(), "hsl(120, 100%, 25%)");
        assert_eq!(Hex::new("#ABCDEF").to_string(), "#ABCDEF");
    }

    #[test]
    fn conversions() {
        let hex = Hex::new("#3AE6F5");
        let rgba: Rgba = (&hex).into();
        let hsl: Hsl = rgba.into();
        assert_eq!(Hex::from(hsl), hex);
        assert_eq!(hsl_to_hex(hex_to_hsl(&hex)), hex);
        assert_eq!(Rgba::from((1, 2, 3, 4)).with_alpha(255), Rgba::rgb(1, 2, 3));
    }
}
