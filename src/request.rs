//! Serializable avatar requests.
//!
//! An [`AvatarRequest`] captures every parameter that influences the output
//! image. It can travel as JSON or as a URL query string, and it provides a
//! canonical cache key for response caches sitting in front of the renderer.
//!
//! # Example
//!
//! ```
//! use avatar_renderer::AvatarRequest;
//!
//! let request = AvatarRequest::from_query("hair=hr(90)&shirt=%23ff0000&width=256").unwrap();
//! assert_eq!(request.shirt, "#ff0000");
//!
//! let json = request.to_json().unwrap();
//! let restored = AvatarRequest::from_json(&json).unwrap();
//! assert_eq!(restored, request);
//! ```

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::{AvatarError, AvatarResult};
use crate::output::OutputOptions;

/// Parameters for rendering one avatar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarRequest {
    /// Transform parameter for the hair layer.
    pub hair: String,

    /// Transform parameter for the shirt layer.
    pub shirt: String,

    /// Output width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pad the output to a square.
    pub square: bool,
}

impl AvatarRequest {
    pub fn new(hair: impl Into<String>, shirt: impl Into<String>) -> Self {
        Self {
            hair: hair.into(),
            shirt: shirt.into(),
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    /// Parses a URL query string such as `hair=hr(45)&shirt=%23ff0000&square=true`.
    ///
    /// Unknown keys are ignored. An empty `width` means no resize; any other
    /// non-numeric width is rejected. `square` is on only for the exact value
    /// `true`.
    pub fn from_query(query: &str) -> AvatarResult<Self> {
        let mut request = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "hair" => request.hair = value.into_owned(),
                "shirt" => request.shirt = value.into_owned(),
                "width" if value.is_empty() => request.width = None,
                "width" => {
                    let width = value.parse::<u32>().map_err(|_| {
                        AvatarError::invalid_output(format!("width is not a number: {value:?}"))
                    })?;
                    request.width = Some(width);
                }
                "square" => request.square = value == "true",
                _ => {}
            }
        }
        Ok(request)
    }

    /// Serializes back to a query string with keys in a fixed order.
    ///
    /// Defaults are omitted, so requests that render identically produce the
    /// same string. Use it as a response-cache key.
    pub fn cache_key(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.hair.is_empty() {
            query.append_pair("hair", &self.hair);
        }
        if !self.shirt.is_empty() {
            query.append_pair("shirt", &self.shirt);
        }
        if self.square {
            query.append_pair("square", "true");
        }
        if let Some(width) = self.width {
            query.append_pair("width", &width.to_string());
        }
        query.finish()
    }

    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            width: self.width,
            square: self.square,
        }
    }

    pub fn to_json(&self) -> AvatarResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AvatarError::Serde(e.to_string()))
    }

    pub fn from_json(json: &str) -> AvatarResult<Self> {
        serde_json::from_str(json).map_err(|e| AvatarError::Serde(e.to_string()))
    }
}
