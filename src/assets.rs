//! Sources of decoded layer images.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{AvatarError, AvatarResult};
use crate::layer::LayerRole;

/// Supplies the decoded image for a layer role.
///
/// Implementations must either return the full image or fail; a missing or
/// corrupt layer is reported as [`AvatarError::AssetLoad`].
pub trait AssetSource {
    fn load(&self, role: LayerRole) -> AvatarResult<RgbaImage>;
}

// ============================================================================
// DirectoryAssets
// ============================================================================

/// Reads `<root>/<role>.png` for each layer.
///
/// Files are read on every call; nothing is cached.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, role: LayerRole) -> PathBuf {
        self.root.join(role.file_name())
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, role: LayerRole) -> AvatarResult<RgbaImage> {
        let path = self.path_for(role);
        let bytes = std::fs::read(&path)
            .map_err(|e| AvatarError::asset_load(role, format!("{}: {e}", path.display())))?;
        let decoded = decode_png(role, &bytes)?;
        tracing::debug!(
            layer = %role,
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            "loaded layer"
        );
        Ok(decoded)
    }
}

/// Decodes PNG bytes into straight-alpha RGBA8.
pub fn decode_png(role: LayerRole, bytes: &[u8]) -> AvatarResult<RgbaImage> {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map(|img| img.to_rgba8())
        .map_err(|e| AvatarError::asset_load(role, e))
}

// ============================================================================
// MemoryAssets
// ============================================================================

/// Layers held in memory, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    layers: HashMap<LayerRole, RgbaImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the image for `role`.
    pub fn with_layer(mut self, role: LayerRole, image: RgbaImage) -> Self {
        self.layers.insert(role, image);
        self
    }

    pub fn insert(&mut self, role: LayerRole, image: RgbaImage) {
        self.layers.insert(role, image);
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, role: LayerRole) -> AvatarResult<RgbaImage> {
        self.layers
            .get(&role)
            .cloned()
            .ok_or_else(|| AvatarError::asset_load(role, "layer not present"))
    }
}

impl<T: AssetSource + ?Sized> AssetSource for &T {
    fn load(&self, role: LayerRole) -> AvatarResult<RgbaImage> {
        (**self).load(role)
    }
}
