//! Avatar assembly from layers and transform parameters.

use image::RgbaImage;

use crate::assets::AssetSource;
use crate::composite::{blank_canvas, composite_sequence};
use crate::error::AvatarResult;
use crate::layer::{LayerRole, LayerSet, Transform};
use crate::output::{encode_png, render_output};
use crate::request::AvatarRequest;

/// Builds composite avatars from an [`AssetSource`].
///
/// `build` takes `&self` and keeps no state between calls, so one builder
/// can serve concurrent requests when the asset source is `Sync`.
///
/// # Example
///
/// ```
/// use avatar_renderer::{AvatarBuilder, LayerRole, MemoryAssets};
/// use image::{Rgba, RgbaImage};
///
/// let mut assets = MemoryAssets::new();
/// for role in LayerRole::STACKING_ORDER {
///     assets.insert(role, RgbaImage::from_pixel(4, 4, Rgba([90, 60, 30, 255])));
/// }
///
/// let avatar = AvatarBuilder::new(assets).build("hr(120)", "#3366ff").unwrap();
/// assert_eq!(avatar.dimensions(), (4, 4));
/// ```
#[derive(Debug, Clone)]
pub struct AvatarBuilder<A> {
    assets: A,
}

impl<A: AssetSource> AvatarBuilder<A> {
    pub fn new(assets: A) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    /// Composites the five layers with the given hair and shirt transforms.
    ///
    /// Either parameter may be empty. Skin, shading and outline are never
    /// transformed. Nothing is drawn unless both parameters parse.
    #[tracing::instrument(skip(self))]
    pub fn build(&self, hair: &str, shirt: &str) -> AvatarResult<RgbaImage> {
        let mut layers = LayerSet::load(&self.assets)?;

        let shirt_transform = Transform::parse(shirt)?;
        let hair_transform = Transform::parse(hair)?;

        for (role, transform) in [
            (LayerRole::Shirt, shirt_transform),
            (LayerRole::Hair, hair_transform),
        ] {
            if transform.is_noop() {
                continue;
            }
            let layer = layers.get_mut(role);
            *layer = transform.apply(layer)?;
        }

        Ok(compose(&layers))
    }

    /// Runs the whole pipeline for a request and returns PNG bytes.
    ///
    /// Output options are validated before any layer is loaded.
    pub fn render(&self, request: &AvatarRequest) -> AvatarResult<Vec<u8>> {
        let options = request.output_options();
        options.validate()?;

        let avatar = self.build(&request.hair, &request.shirt)?;
        let shaped = render_output(avatar, &options)?;
        encode_png(&shaped)
    }
}

/// Stacks an already-transformed layer set onto a canvas sized to the shirt.
pub fn compose(layers: &LayerSet) -> RgbaImage {
    let mut canvas = blank_canvas(&layers.shirt);
    let stack: Vec<(&RgbaImage, (i32, i32))> =
        layers.iter().map(|(_, image)| (image, (0, 0))).collect();
    composite_sequence(&mut canvas, &stack);

    tracing::debug!(
        width = canvas.width(),
        height = canvas.height(),
        "avatar composited"
    );
    canvas
}
