//! Final shaping and encoding of a built avatar.

use std::io::Cursor;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::composite::composite_over;
use crate::error::{AvatarError, AvatarResult};

/// Widths must be strictly below this.
pub const MAX_WIDTH: u32 = 2000;

/// How the composited avatar is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// Target width in pixels; height follows the aspect ratio.
    pub width: Option<u32>,
    /// Widen the canvas to a square, centering the avatar horizontally.
    /// Convenient for circular avatar pickers.
    pub square: bool,
}

impl OutputOptions {
    pub fn validate(&self) -> AvatarResult<()> {
        match self.width {
            Some(w) if w == 0 || w >= MAX_WIDTH => Err(AvatarError::invalid_output(format!(
                "width must be between 1 and {}, got {w}",
                MAX_WIDTH - 1
            ))),
            _ => Ok(()),
        }
    }
}

/// Applies resizing, then squaring.
pub fn render_output(image: RgbaImage, options: &OutputOptions) -> AvatarResult<RgbaImage> {
    options.validate()?;

    let image = match options.width {
        Some(width) => resize_to_width(&image, width),
        None => image,
    };

    Ok(if options.square {
        square_canvas(&image)
    } else {
        image
    })
}

/// Bicubic resize to `width`, preserving aspect ratio.
pub fn resize_to_width(image: &RgbaImage, width: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }
    let height = ((u64::from(h) * u64::from(width) + u64::from(w) / 2) / u64::from(w)).max(1);
    imageops::resize(image, width, height as u32, FilterType::CatmullRom)
}

/// Expands the canvas width to the image height.
///
/// The image is centered horizontally. An image wider than it is tall is
/// cropped on both sides.
pub fn square_canvas(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut squared = RgbaImage::new(h, h);
    let x = (i64::from(h) - i64::from(w)) / 2;
    composite_over(&mut squared, image, x as i32, 0);
    squared
}

/// Encodes to PNG bytes.
pub fn encode_png(image: &RgbaImage) -> AvatarResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| AvatarError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn width_bounds() {
        for bad in [0, MAX_WIDTH, MAX_WIDTH + 1] {
            let opts = OutputOptions {
                width: Some(bad),
                square: false,
            };
            assert!(matches!(
                opts.validate(),
                Err(AvatarError::InvalidOutputOptions(_))
            ));
        }
        assert!(OutputOptions::default().validate().is_ok());
        assert!(
            OutputOptions {
                width: Some(MAX_WIDTH - 1),
                square: false
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn resize_keeps_aspect_ratio() {
        let img = RgbaImage::from_pixel(40, 80, Rgba([1, 2, 3, 255]));
        let out = resize_to_width(&img, 10);
        assert_eq!(out.dimensions(), (10, 20));
    }

    #[test]
    fn resize_never_collapses_height() {
        let img = RgbaImage::from_pixel(100, 1, Rgba([1, 2, 3, 255]));
        assert_eq!(resize_to_width(&img, 3).dimensions(), (3, 1));
    }

    #[test]
    fn square_centers_horizontally() {
        let img = RgbaImage::from_pixel(2, 6, Rgba([50, 60, 70, 255]));
        let out = square_canvas(&img);

        assert_eq!(out.dimensions(), (6, 6));
        assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(2, 0).0, [50, 60, 70, 255]);
        assert_eq!(out.get_pixel(3, 5).0, [50, 60, 70, 255]);
        assert_eq!(out.get_pixel(4, 5).0, [0, 0, 0, 0]);
    }

    #[test]
    fn render_output_resizes_then_squares() {
        let img = RgbaImage::from_pixel(50, 100, Rgba([9, 9, 9, 255]));
        let out = render_output(
            img,
            &OutputOptions {
                width: Some(25),
                square: true,
            },
        )
        .unwrap();
        assert_eq!(out.dimensions(), (50, 50));
    }

    #[test]
    fn encoded_png_decodes_back() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([4, 5, 6, 200]));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
