//! Parsing and application of per-layer color transforms.
//!
//! A transform parameter is one of:
//!
//! | Parameter            | Transform                       |
//! |----------------------|---------------------------------|
//! | `""`                 | [`Transform::NoOp`]             |
//! | `hr(45)`             | [`Transform::HueRotate`]        |
//! | `#ff8800`, `#f80`    | [`Transform::FlatColor`]        |
//! | `rgb(255, 136, 0)`   | [`Transform::FlatColor`]        |
//! | `rgb(100%, 50%, 0%)` | [`Transform::FlatColor`]        |

use std::str::FromStr;

use image::{Rgb, RgbaImage};

use super::flat_color::apply_flat_color;
use super::hue_rotation::apply_hue_rotation;
use crate::error::{AvatarError, AvatarResult};

/// A color transform for a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Transform {
    /// Leave the layer as it is.
    #[default]
    NoOp,
    /// Rotate hue in LCh space by the given number of degrees.
    HueRotate { degrees: f32 },
    /// Paint every visible pixel with one color, keeping alpha.
    FlatColor(Rgb<u8>),
}

impl Transform {
    /// Parses a transform parameter.
    ///
    /// A non-numeric `hr(...)` payload yields a rotation of `0.0` instead of
    /// an error; existing links rely on it.
    pub fn parse(param: &str) -> AvatarResult<Self> {
        if param.is_empty() {
            return Ok(Transform::NoOp);
        }

        let transform = if let Some(payload) = hue_rotate_payload(param) {
            Transform::HueRotate {
                degrees: parse_degrees(payload),
            }
        } else if let Some(color) = parse_hex(param).or_else(|| parse_rgb(param)) {
            Transform::FlatColor(color)
        } else {
            return Err(AvatarError::invalid_parameter(param));
        };

        tracing::debug!(param, ?transform, "parsed transform");
        Ok(transform)
    }

    /// Returns true if applying this transform cannot change any pixel.
    pub fn is_noop(&self) -> bool {
        matches!(self, Transform::NoOp)
    }

    /// Applies the transform, producing a new image of the same size.
    pub fn apply(&self, layer: &RgbaImage) -> AvatarResult<RgbaImage> {
        match *self {
            Transform::NoOp => Ok(layer.clone()),
            Transform::HueRotate { degrees } => apply_hue_rotation(layer, degrees),
            Transform::FlatColor(color) => Ok(apply_flat_color(layer, color)),
        }
    }
}

impl FromStr for Transform {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn hue_rotate_payload(param: &str) -> Option<&str> {
    let payload = param.strip_prefix("hr(")?.strip_suffix(')')?;
    (!payload.is_empty()).then_some(payload)
}

fn parse_degrees(payload: &str) -> f32 {
    match payload.parse::<f32>() {
        Ok(degrees) if degrees.is_finite() => degrees,
        _ => {
            tracing::debug!(payload, "non-numeric hue rotation, using 0");
            0.0
        }
    }
}

/// `#rrggbb`, `rrggbb` or `#rgb`. Three bare digits are not a color.
fn parse_hex(param: &str) -> Option<Rgb<u8>> {
    let (digits, hashed) = match param.strip_prefix('#') {
        Some(digits) => (digits, true),
        None => (param, false),
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        6 => Some(Rgb([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ])),
        3 if hashed => {
            let short = |s: &str| channel(s).map(|v| v * 17);
            Some(Rgb([
                short(&digits[0..1])?,
                short(&digits[1..2])?,
                short(&digits[2..3])?,
            ]))
        }
        _ => None,
    }
}

/// `rgb(r, g, b)` with either all integer channels or all percentages.
fn parse_rgb(param: &str) -> Option<Rgb<u8>> {
    let inner = param.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return None;
    };

    let percent = r.ends_with('%');
    let channel = |s: &str| -> Option<u8> {
        if percent {
            let value = s.strip_suffix('%')?;
            if !is_decimal(value) {
                return None;
            }
            let value: u8 = value.parse().ok()?;
            (value <= 100).then(|| (f32::from(value) * 255.0 / 100.0).round() as u8)
        } else {
            if !is_decimal(s) {
                return None;
            }
            s.parse().ok()
        }
    };

    Some(Rgb([channel(*r)?, channel(*g)?, channel(*b)?]))
}

/// Plain digits with no leading zero, so `007` is not a channel.
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn empty_is_noop() {
        assert_eq!(Transform::parse("").unwrap(), Transform::NoOp);
        assert!(Transform::default().is_noop());
    }

    #[test]
    fn hue_rotate() {
        assert_eq!(
            Transform::parse("hr(45)").unwrap(),
            Transform::HueRotate { degrees: 45.0 }
        );
        assert_eq!(
            Transform::parse("hr(-12.5)").unwrap(),
            Transform::HueRotate { degrees: -12.5 }
        );
    }

    #[test]
    fn non_numeric_hue_rotate_is_zero() {
        assert_eq!(
            Transform::parse("hr(abc)").unwrap(),
            Transform::HueRotate { degrees: 0.0 }
        );
        assert_eq!(
            Transform::parse("hr(NaN)").unwrap(),
            Transform::HueRotate { degrees: 0.0 }
        );
    }

    #[test]
    fn hue_rotate_prefix_is_case_sensitive() {
        assert!(Transform::parse("HR(45)").is_err());
        assert!(Transform::parse("hr()").is_err());
        assert!(Transform::parse("hr(45").is_err());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(
            Transform::parse("#FF0000").unwrap(),
            Transform::FlatColor(Rgb([255, 0, 0]))
        );
        assert_eq!(
            Transform::parse("00ff7f").unwrap(),
            Transform::FlatColor(Rgb([0, 255, 127]))
        );
        assert_eq!(
            Transform::parse("#f80").unwrap(),
            Transform::FlatColor(Rgb([255, 136, 0]))
        );
        assert!(Transform::parse("#ff00").is_err());
        assert!(Transform::parse("#gg0000").is_err());
    }

    #[test]
    fn short_hex_needs_a_hash() {
        for word in ["fed", "add", "bad"] {
            match Transform::parse(word) {
                Err(AvatarError::InvalidTransformParameter(p)) => assert_eq!(p, word),
                other => panic!("{word} parsed as {other:?}"),
            }
        }
        assert_eq!(
            Transform::parse("#fed").unwrap(),
            Transform::FlatColor(Rgb([255, 238, 221]))
        );
    }

    #[test]
    fn rgb_literals() {
        assert_eq!(
            Transform::parse("rgb(1,2,3)").unwrap(),
            Transform::FlatColor(Rgb([1, 2, 3]))
        );
        assert_eq!(
            Transform::parse("rgb( 255 , 128 , 0 )").unwrap(),
            Transform::FlatColor(Rgb([255, 128, 0]))
        );
        assert_eq!(
            Transform::parse("rgb(100%,50%,0%)").unwrap(),
            Transform::FlatColor(Rgb([255, 128, 0]))
        );
        assert!(Transform::parse("rgb(256,0,0)").is_err());
        assert!(Transform::parse("rgb(1,2)").is_err());
        assert!(Transform::parse("rgb(100%,50,0)").is_err());
        assert!(Transform::parse("rgb(-1,0,0)").is_err());
    }

    #[test]
    fn rgb_channels_reject_leading_zeros() {
        assert!(Transform::parse("rgb(007,0,0)").is_err());
        assert!(Transform::parse("rgb(0,00,0)").is_err());
        assert!(Transform::parse("rgb(050%,0%,0%)").is_err());
        assert_eq!(
            Transform::parse("rgb(0,0,0)").unwrap(),
            Transform::FlatColor(Rgb([0, 0, 0]))
        );
        assert_eq!(
            Transform::parse("rgb(0%,0%,100%)").unwrap(),
            Transform::FlatColor(Rgb([0, 0, 255]))
        );
    }

    #[test]
    fn garbage_is_rejected() {
        match Transform::parse("not-a-color") {
            Err(AvatarError::InvalidTransformParameter(p)) => assert_eq!(p, "not-a-color"),
            other => panic!("expected InvalidTransformParameter, got {other:?}"),
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let t: Transform = "hr(90)".parse().unwrap();
        assert_eq!(t, Transform::HueRotate { degrees: 90.0 });
    }

    #[test]
    fn noop_apply_is_pixel_identical() {
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([5, 6, 7, 255]));
        img.put_pixel(2, 1, Rgba([9, 9, 9, 0]));
        assert_eq!(Transform::NoOp.apply(&img).unwrap(), img);
    }

    #[test]
    fn flat_color_apply() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([5, 6, 7, 33]));
        let out = Transform::FlatColor(Rgb([1, 2, 3])).apply(&img).unwrap();
        assert!(out.pixels().all(|p| p.0 == [1, 2, 3, 33]));
    }

    #[test]
    fn transparent_pixels_survive_every_transform() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 50, 255]));
        img.put_pixel(1, 0, Rgba([1, 2, 3, 0]));

        for t in [
            Transform::NoOp,
            Transform::HueRotate { degrees: 77.0 },
            Transform::FlatColor(Rgb([0, 0, 0])),
        ] {
            let out = t.apply(&img).unwrap();
            assert_eq!(out.get_pixel(1, 0).0, [1, 2, 3, 0], "{t:?}");
        }
    }
}
