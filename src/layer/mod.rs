//! Avatar layers and the transforms that can be applied to them.
//!
//! An avatar is built from five PNG layers stacked in a fixed order. Only the
//! shirt and hair layers accept a [`Transform`]; the rest are drawn as-is.
//!
//! # Stacking Order
//!
//! ```text
//! ┌─────────┐
//! │ Outline │ ◄── top
//! ├─────────┤
//! │ Shading │
//! ├─────────┤
//! │  Hair   │ ◄── transformable
//! ├─────────┤
//! │  Skin   │
//! ├─────────┤
//! │  Shirt  │ ◄── transformable, sizes the canvas
//! └─────────┘
//! ```

pub mod flat_color;
pub mod hue_rotation;
pub mod transform;

pub use transform::Transform;

use std::fmt;

use image::RgbaImage;

use crate::assets::AssetSource;
use crate::error::AvatarResult;

// ============================================================================
// LayerRole
// ============================================================================

/// The visual component a layer represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerRole {
    Shirt,
    Skin,
    Hair,
    Shading,
    Outline,
}

impl LayerRole {
    /// All roles, bottom to top.
    pub const STACKING_ORDER: [LayerRole; 5] = [
        LayerRole::Shirt,
        LayerRole::Skin,
        LayerRole::Hair,
        LayerRole::Shading,
        LayerRole::Outline,
    ];

    /// Logical asset name.
    pub fn name(self) -> &'static str {
        match self {
            LayerRole::Shirt => "shirt",
            LayerRole::Skin => "skin",
            LayerRole::Hair => "hair",
            LayerRole::Shading => "shading",
            LayerRole::Outline => "outline",
        }
    }

    /// File name of the layer inside an asset directory.
    pub fn file_name(self) -> String {
        format!("{}.png", self.name())
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// LayerSet
// ============================================================================

/// The five decoded layers of one avatar.
///
/// All layers are expected to share the same dimensions. This is a property
/// of the asset set and is not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    pub shirt: RgbaImage,
    pub skin: RgbaImage,
    pub hair: RgbaImage,
    pub shading: RgbaImage,
    pub outline: RgbaImage,
}

impl LayerSet {
    /// Loads every layer from `source` in stacking order.
    ///
    /// Fails on the first layer that cannot be loaded.
    pub fn load<S: AssetSource + ?Sized>(source: &S) -> AvatarResult<Self> {
        Ok(Self {
            shirt: source.load(LayerRole::Shirt)?,
            skin: source.load(LayerRole::Skin)?,
            hair: source.load(LayerRole::Hair)?,
            shading: source.load(LayerRole::Shading)?,
            outline: source.load(LayerRole::Outline)?,
        })
    }

    pub fn get(&self, role: LayerRole) -> &RgbaImage {
        match role {
            LayerRole::Shirt => &self.shirt,
            LayerRole::Skin => &self.skin,
            LayerRole::Hair => &self.hair,
            LayerRole::Shading => &self.shading,
            LayerRole::Outline => &self.outline,
        }
    }

    pub fn get_mut(&mut self, role: LayerRole) -> &mut RgbaImage {
        match role {
            LayerRole::Shirt => &mut self.shirt,
            LayerRole::Skin => &mut self.skin,
            LayerRole::Hair => &mut self.hair,
            LayerRole::Shading => &mut self.shading,
            LayerRole::Outline => &mut self.outline,
        }
    }

    /// Iterates layers bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = (LayerRole, &RgbaImage)> {
        LayerRole::STACKING_ORDER
            .into_iter()
            .map(move |role| (role, self.get(role)))
    }
}
