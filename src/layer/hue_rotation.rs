//! Hue rotation in LCh space.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::color::{from_perceptual, to_perceptual};
use crate::error::{AvatarError, AvatarResult};

/// Rotates the hue of every visible pixel by `degrees`.
///
/// Alpha is carried over untouched and fully transparent pixels are copied
/// byte-for-byte. Each distinct input color is converted once per call, so
/// every pixel sharing a palette entry gets exactly the same output.
pub fn apply_hue_rotation(layer: &RgbaImage, degrees: f32) -> AvatarResult<RgbaImage> {
    let mut result = layer.clone();
    let mut memo: HashMap<Rgba<u8>, Rgba<u8>> = HashMap::new();
    let mut hits = 0usize;

    for pixel in result.pixels_mut() {
        if pixel[3] == 0 {
            continue;
        }

        if let Some(cached) = memo.get(&*pixel) {
            *pixel = *cached;
            hits += 1;
            continue;
        }

        let rotated = rotate_pixel(*pixel, degrees)?;
        memo.insert(*pixel, rotated);
        *pixel = rotated;
    }

    tracing::trace!(
        degrees,
        distinct_colors = memo.len(),
        memo_hits = hits,
        "hue rotation applied"
    );

    Ok(result)
}

fn rotate_pixel(pixel: Rgba<u8>, degrees: f32) -> AvatarResult<Rgba<u8>> {
    let perceptual = to_perceptual(pixel)?.rotated(degrees);
    from_perceptual(perceptual, pixel[3]).map_err(|_| AvatarError::color_conversion(pixel))
}
