//! Tile sources and URL templating.
//!
//! A [`TileSource`] is a validated URL template plus the image format the
//! server returns. Built-in sources are plain constructors over
//! [`TileSource::custom`], so a run always carries the resolved template
//! rather than an index into a table.

use std::fmt;
use std::str::FromStr;

use super::types::{ImageFormat, ProviderError};
use crate::coord::TileCoord;

/// Placeholder replaced by the zoom level.
pub const ZOOM_TOKEN: &str = "{z}";
/// Placeholder replaced by the tile column.
pub const COL_TOKEN: &str = "{x}";
/// Placeholder replaced by the tile row (XYZ convention).
pub const ROW_TOKEN: &str = "{y}";

const GOOGLE_HYBRID_TEMPLATE: &str = "http://mt2.google.com/vt/lyrs=y&x={x}&y={y}&z={z}";
const OSM_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAPBOX_SATELLITE_TEMPLATE: &str =
    "https://api.mapbox.com/v4/mapbox.satellite/{z}/{x}/{y}.png";

/// Substitutes every `{z}`, `{x}` and `{y}` in `template` with the decimal
/// values of `coord`.
///
/// Tokens absent from the template are simply not substituted.
pub fn render_template(template: &str, coord: &TileCoord) -> String {
    template
        .replace(ZOOM_TOKEN, &coord.zoom.to_string())
        .replace(COL_TOKEN, &coord.col.to_string())
        .replace(ROW_TOKEN, &coord.row.to_string())
}

/// Named built-in sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Google Maps hybrid (satellite with labels), JPEG
    Google,
    /// OpenStreetMap standard tiles, PNG
    Osm,
    /// MapBox satellite, PNG (requires access token)
    Mapbox,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Google => "google",
            SourceKind::Osm => "osm",
            SourceKind::Mapbox => "mapbox",
        }
    }

    /// Resolves the kind into a concrete source.
    pub fn to_source(&self, mapbox_token: Option<&str>) -> Result<TileSource, ProviderError> {
        match self {
            SourceKind::Google => Ok(TileSource::google()),
            SourceKind::Osm => Ok(TileSource::osm()),
            SourceKind::Mapbox => {
                let token = mapbox_token.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
                    ProviderError::MissingCredential(
                        "MapBox source requires an access token".to_string(),
                    )
                })?;
                TileSource::mapbox(token)
            }
        }
    }
}

impl FromStr for SourceKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(SourceKind::Google),
            "osm" | "openstreetmap" => Ok(SourceKind::Osm),
            "mapbox" => Ok(SourceKind::Mapbox),
            other => Err(ProviderError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated tile URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    name: String,
    template: String,
    format: ImageFormat,
}

impl TileSource {
    /// Creates a source from an arbitrary template.
    ///
    /// The template must be an `http(s)` URL containing `{z}`, `{x}` and
    /// `{y}`. The image format is guessed from the template's extension;
    /// override it with [`TileSource::with_format`].
    pub fn custom(template: impl Into<String>) -> Result<Self, ProviderError> {
        let template = template.into();
        validate_template(&template)?;
        let format = ImageFormat::from_template(&template);
        Ok(Self {
            name: "custom".to_string(),
            template,
            format,
        })
    }

    pub fn google() -> Self {
        Self::builtin(SourceKind::Google, GOOGLE_HYBRID_TEMPLATE, ImageFormat::Jpg)
    }

    pub fn osm() -> Self {
        Self::builtin(SourceKind::Osm, OSM_TEMPLATE, ImageFormat::Png)
    }

    pub fn mapbox(access_token: &str) -> Result<Self, ProviderError> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(ProviderError::MissingCredential(
                "MapBox source requires an access token".to_string(),
            ));
        }
        let template = format!("{}?access_token={}", MAPBOX_SATELLITE_TEMPLATE, token);
        validate_template(&template)?;
        Ok(Self {
            name: SourceKind::Mapbox.as_str().to_string(),
            template,
            format: ImageFormat::Png,
        })
    }

    fn builtin(kind: SourceKind, template: &str, format: ImageFormat) -> Self {
        Self {
            name: kind.as_str().to_string(),
            template: template.to_string(),
            format,
        }
    }

    /// Overrides the image format.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// URL for one tile.
    pub fn url_for(&self, coord: &TileCoord) -> String {
        render_template(&self.template, coord)
    }
}

fn validate_template(template: &str) -> Result<(), ProviderError> {
    let lower = template.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ProviderError::InvalidTemplate(format!(
            "'{}' must start with http:// or https://",
            template
        )));
    }
    let missing: Vec<&str> = [ZOOM_TOKEN, COL_TOKEN, ROW_TOKEN]
        .into_iter()
        .filter(|token| !template.contains(token))
        .collect();
    if !missing.is_empty() {
        return Err(ProviderError::InvalidTemplate(format!(
            "'{}' is missing placeholder(s) {}",
            template,
            missing.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_slippy_template() {
        let url = render_template(
            "https://tiles.example.com/{z}/{x}/{y}.png",
            &TileCoord::new(4, 2, 1),
        );
        assert_eq!(url, "https://tiles.example.com/4/2/1.png");
    }

    #[test]
    fn test_render_query_template_in_any_order() {
        let source = TileSource::google();
        assert_eq!(
            source.url_for(&TileCoord::new(18, 171411, 112025)),
            "http://mt2.google.com/vt/lyrs=y&x=171411&y=112025&z=18"
        );
    }

    #[test]
    fn test_render_replaces_repeated_tokens() {
        let url = render_template("http://{z}.t/{z}/{x}/{y}", &TileCoord::new(3, 1, 2));
        assert_eq!(url, "http://3.t/3/1/2");
    }

    #[test]
    fn test_render_without_placeholders_is_noop() {
        let url = render_template("http://static.example.com/tile.png", &TileCoord::new(1, 1, 1));
        assert_eq!(url, "http://static.example.com/tile.png");
    }

    #[test]
    fn test_custom_source_validation() {
        let source = TileSource::custom("https://t.example.com/{z}/{x}/{y}.jpg").unwrap();
        assert_eq!(source.name(), "custom");
        assert_eq!(source.format(), ImageFormat::Jpg);

        assert!(matches!(
            TileSource::custom("ftp://t/{z}/{x}/{y}.png"),
            Err(ProviderError::InvalidTemplate(_))
        ));
        let err = TileSource::custom("https://t/{z}/{x}.png").unwrap_err();
        assert!(err.to_string().contains("{y}"), "{}", err);
    }

    #[test]
    fn test_builtin_sources() {
        assert_eq!(TileSource::google().format(), ImageFormat::Jpg);
        assert_eq!(TileSource::osm().format(), ImageFormat::Png);
        assert_eq!(TileSource::osm().name(), "osm");

        let mapbox = TileSource::mapbox("pk.test").unwrap();
        assert!(mapbox.template().ends_with("?access_token=pk.test"));
        assert!(matches!(
            TileSource::mapbox("  "),
            Err(ProviderError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_source_kind_resolution() {
        assert_eq!("OSM".parse::<SourceKind>(), Ok(SourceKind::Osm));
        assert!("bing".parse::<SourceKind>().is_err());
        assert_eq!(
            SourceKind::Google.to_source(None).unwrap(),
            TileSource::google()
        );
        assert!(matches!(
            SourceKind::Mapbox.to_source(None),
            Err(ProviderError::MissingCredential(_))
        ));
        assert!(SourceKind::Mapbox.to_source(Some("pk.abc")).is_ok());
    }

    #[test]
    fn test_with_format_overrides_guess() {
        let source = TileSource::custom("https://t/{z}/{x}/{y}")
            .unwrap()
            .with_format(ImageFormat::Jpg);
        assert_eq!(source.format(), ImageFormat::Jpg);
    }

    proptest! {
        /// Property: each placeholder is replaced whatever order the template uses.
        #[test]
        fn prop_placeholders_replaced_in_any_order(
            order in Just(vec![ZOOM_TOKEN, COL_TOKEN, ROW_TOKEN]).prop_shuffle(),
            zoom in 0u8..=24,
            col in any::<u32>(),
            row in any::<u32>(),
        ) {
            let template = format!("http://t/{}/{}/{}", order[0], order[1], order[2]);
            let url = render_template(&template, &TileCoord::new(zoom, col, row));

            prop_assert!(!url.contains('{'), "unreplaced placeholder in {}", url);
            let value = |token: &str| match token {
                ZOOM_TOKEN => zoom.to_string(),
                COL_TOKEN => col.to_string(),
                _ => row.to_string(),
            };
            let expected = format!(
                "http://t/{}/{}/{}",
                value(order[0]),
                value(order[1]),
                value(order[2])
            );
            prop_assert_eq!(url, expected);
        }
    }
}
