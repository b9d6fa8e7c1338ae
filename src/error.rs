//! Error types for avatar generation.

use crate::layer::LayerRole;

/// Result alias used throughout the crate.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Everything that can abort an avatar build or its output stage.
///
/// A build never returns a partial image: it either produces a complete
/// composite or fails with one of these.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// A source layer is missing or could not be decoded.
    #[error("failed to load layer '{layer}': {reason}")]
    AssetLoad { layer: LayerRole, reason: String },

    /// A hair or shirt parameter did not match any known transform syntax.
    #[error("invalid transform parameter: {0:?}")]
    InvalidTransformParameter(String),

    /// Perceptual conversion produced a non-finite value for this color.
    #[error("color conversion undefined for rgba({r}, {g}, {b}, {a})")]
    ColorConversion { r: u8, g: u8, b: u8, a: u8 },

    /// Requested output shape is out of range.
    #[error("invalid output options: {0}")]
    InvalidOutputOptions(String),

    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error("serialization error: {0}")]
    Serde(String),
}

impl AvatarError {
    pub fn asset_load(layer: LayerRole, reason: impl ToString) -> Self {
        Self::AssetLoad {
            layer,
            reason: reason.to_string(),
        }
    }

    pub fn invalid_parameter(param: impl Into<String>) -> Self {
        Self::InvalidTransformParameter(param.into())
    }

    pub fn invalid_output(msg: impl Into<String>) -> Self {
        Self::InvalidOutputOptions(msg.into())
    }

    pub fn color_conversion(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::ColorConversion { r, g, b, a }
    }

    /// Returns true when the caller supplied bad input (HTTP 400 territory).
    ///
    /// Everything else is a server-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransformParameter(_) | Self::InvalidOutputOptions(_) | Self::Serde(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            AvatarError::invalid_parameter("x")
                .to_string()
                .contains("invalid transform parameter:")
        );
        assert!(
            AvatarError::asset_load(LayerRole::Hair, "missing")
                .to_string()
                .contains("failed to load layer 'hair': missing")
        );
        assert!(
            AvatarError::invalid_output("w")
                .to_string()
                .contains("invalid output options:")
        );
    }

    #[test]
    fn color_conversion_carries_pixel() {
        let err = AvatarError::color_conversion(image::Rgba([1, 2, 3, 4]));
        assert_eq!(
            err.to_string(),
            "color conversion undefined for rgba(1, 2, 3, 4)"
        );
    }

    #[test]
    fn client_errors_are_classified() {
        assert!(AvatarError::invalid_parameter("bad").is_client_error());
        assert!(AvatarError::invalid_output("bad").is_client_error());
        assert!(!AvatarError::asset_load(LayerRole::Shirt, "gone").is_client_error());
        assert!(!AvatarError::Encode("io".into()).is_client_error());
    }
}
