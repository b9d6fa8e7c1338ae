//! Layer compositing onto a canvas.
//!
//! The avatar assets are drawn with hard edges: every pixel is either fully
//! transparent or meant to cover what lies beneath it. Compositing therefore
//! replaces the canvas pixel wherever the layer has any alpha at all, rather
//! than blending partial translucency.

use image::RgbaImage;

/// Creates a fully transparent canvas the size of `base`.
pub fn blank_canvas(base: &RgbaImage) -> RgbaImage {
    RgbaImage::new(base.width(), base.height())
}

/// Draws `layer` onto `canvas` with its top-left corner at `(x, y)`.
///
/// Parts of the layer that fall outside the canvas are clipped.
pub fn composite_over(canvas: &mut RgbaImage, layer: &RgbaImage, x: i32, y: i32) {
    let canvas_width = canvas.width() as i64;
    let canvas_height = canvas.height() as i64;

    for (sx, sy, pixel) in layer.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }

        let dx = i64::from(x) + i64::from(sx);
        let dy = i64::from(y) + i64::from(sy);

        // Skip if outside canvas bounds
        if dx < 0 || dy < 0 || dx >= canvas_width || dy >= canvas_height {
            continue;
        }

        canvas.put_pixel(dx as u32, dy as u32, *pixel);
    }
}

/// Draws each layer in order; later layers end up on top.
pub fn composite_sequence(canvas: &mut RgbaImage, layers: &[(&RgbaImage, (i32, i32))]) {
    for (layer, (x, y)) in layers {
        composite_over(canvas, layer, *x, *y);
    }
}
