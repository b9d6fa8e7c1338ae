//! Solid recoloring that keeps only a layer's alpha mask.

use image::{Rgb, Rgba, RgbaImage};

/// Replaces the color of every visible pixel with `color`.
///
/// The original alpha is kept, so the layer becomes a silhouette of its
/// mask. Fully transparent pixels are left as they are.
pub fn apply_flat_color(layer: &RgbaImage, color: Rgb<u8>) -> RgbaImage {
    let [r, g, b] = color.0;
    let mut result = layer.clone();

    for pixel in result.pixels_mut() {
        let a = pixel[3];
        if a > 0 {
            *pixel = Rgba([r, g, b, a]);
        }
    }

    result
}
