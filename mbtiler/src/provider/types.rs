//! Provider types

use std::fmt;
use std::str::FromStr;

/// Errors that can occur while resolving or fetching tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    HttpError(String),
    /// URL template is unusable
    InvalidTemplate(String),
    /// Source needs a credential that was not supplied
    MissingCredential(String),
    /// Unknown source or image format name
    UnknownSource(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::InvalidTemplate(msg) => write!(f, "Invalid URL template: {}", msg),
            ProviderError::MissingCredential(msg) => write!(f, "Missing credential: {}", msg),
            ProviderError::UnknownSource(name) => write!(f, "Unknown tile source: {}", name),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Raster encoding served by a tile source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
}

impl ImageFormat {
    /// File extension, also used as the MBTiles `format` metadata value.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
        }
    }

    /// Guesses the format from the path of a URL template.
    ///
    /// Falls back to PNG when the template carries no recognisable extension.
    pub fn from_template(template: &str) -> Self {
        let path = template.split(['?', '#']).next().unwrap_or(template);
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            ImageFormat::Jpg
        } else {
            ImageFormat::Png
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" | "image/jpg" | "image/jpeg" => Ok(ImageFormat::Jpg),
            other => Err(ProviderError::UnknownSource(format!(
                "image format '{}' (expected png or jpg)",
                other
            ))),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
