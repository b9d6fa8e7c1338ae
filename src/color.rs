//! Conversion between device RGBA and CIE LCh.
//!
//! LCh is the polar form of CIE L\*a\*b\* (D65). Rotating its hue changes a
//! color's identity while keeping perceived lightness and colorfulness, which
//! is what recoloring hair and shirts needs.

use image::Rgba;
use palette::{Clamp, IntoColor, Lch, Srgb};

use crate::error::{AvatarError, AvatarResult};

/// A color in hue/chroma/luminance form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perceptual {
    /// Hue angle in degrees, `[0, 360)`.
    pub hue: f32,
    pub chroma: f32,
    pub luminance: f32,
}

impl Perceptual {
    /// Returns a copy with `degrees` added to the hue, normalized to `[0, 360)`.
    pub fn rotated(self, degrees: f32) -> Self {
        Self {
            hue: (self.hue + degrees).rem_euclid(360.0),
            ..self
        }
    }
}

/// Converts an 8-bit color to LCh. Alpha is ignored.
pub fn to_perceptual(pixel: Rgba<u8>) -> AvatarResult<Perceptual> {
    let [r, g, b, _] = pixel.0;
    let rgb: Srgb = Srgb::new(r, g, b).into_format();
    let lch: Lch = rgb.into_color();

    let hue = lch.hue.into_positive_degrees();
    if !(hue.is_finite() && lch.chroma.is_finite() && lch.l.is_finite()) {
        return Err(AvatarError::color_conversion(pixel));
    }

    Ok(Perceptual {
        hue,
        chroma: lch.chroma,
        luminance: lch.l,
    })
}

/// Converts an LCh color back to 8-bit sRGB with the given alpha.
///
/// Out-of-gamut results are clamped per channel, never wrapped.
pub fn from_perceptual(color: Perceptual, alpha: u8) -> AvatarResult<Rgba<u8>> {
    let lch = Lch::new(color.luminance, color.chroma, color.hue.rem_euclid(360.0));
    let rgb: Srgb = lch.into_color();

    if !(rgb.red.is_finite() && rgb.green.is_finite() && rgb.blue.is_finite()) {
        return Err(AvatarError::ColorConversion {
            r: 0,
            g: 0,
            b: 0,
            a: alpha,
        });
    }

    let rgb: Srgb<u8> = rgb.clamp().into_format();
    Ok(Rgba([rgb.red, rgb.green, rgb.blue, alpha]))
}
