//! avatar-renderer: Layered character avatars with per-layer recoloring
//!
//! This crate composites an avatar from five PNG layers (shirt, skin, hair,
//! shading, outline). The shirt and hair layers can be recolored first,
//! either by rotating their hue in CIE LCh or by painting them a flat color.
//!
//! # Example
//!
//! ```no_run
//! use avatar_renderer::{AvatarBuilder, DirectoryAssets};
//!
//! let builder = AvatarBuilder::new(DirectoryAssets::new("assets"));
//!
//! // Hair hue rotated by 45 degrees, shirt painted red
//! let avatar = builder.build("hr(45)", "#ff0000").unwrap();
//! avatar.save("avatar.png").unwrap();
//! ```
//!
//! # Requests
//!
//! For HTTP front ends, use [`AvatarRequest`] to parse query parameters and
//! run the full pipeline including resizing and PNG encoding:
//!
//! ```no_run
//! use avatar_renderer::{AvatarBuilder, AvatarRequest, DirectoryAssets};
//!
//! let builder = AvatarBuilder::new(DirectoryAssets::new("assets"));
//! let request = AvatarRequest::from_query("hair=hr(90)&width=256&square=true").unwrap();
//!
//! let png = builder.render(&request).unwrap();
//! let cache_key = request.cache_key();
//! ```

mod assets;
mod avatar;
mod color;
mod composite;
mod error;
mod layer;
mod output;
mod request;

pub use assets::{AssetSource, DirectoryAssets, MemoryAssets, decode_png};
pub use avatar::{AvatarBuilder, compose};
pub use color::{Perceptual, from_perceptual, to_perceptual};
pub use composite::{blank_canvas, composite_over, composite_sequence};
pub use error::{AvatarError, AvatarResult};
pub use layer::{LayerRole, LayerSet, Transform};
pub use output::{
    MAX_WIDTH, OutputOptions, encode_png, render_output, resize_to_width, square_canvas,
};
pub use request::AvatarRequest;
