//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let url = config.source.url.as_deref().unwrap_or("");
    let format = config
        .source
        .format
        .map(|f| f.extension().to_string())
        .unwrap_or_default();
    let mapbox_access_token = config.source.mapbox_access_token.as_deref().unwrap_or("");
    let queue_capacity = config
        .download
        .queue_capacity
        .map(|c| c.to_string())
        .unwrap_or_default();

    format!(
        r#"[source]
; Built-in tile source:
;   google - Google hybrid imagery (jpg)
;   osm    - OpenStreetMap standard tiles (png)
;   mapbox - MapBox satellite (png, requires access token)
type = {}
; Custom URL template; overrides type when set.
; Must be http(s) and contain {{z}}, {{x}} and {{y}}.
; Example: url = https://tiles.example.com/{{z}}/{{x}}/{{y}}.png
url = {}
; Image format override (png or jpg). Empty uses the source default.
format = {}
; MapBox access token (only required when type = mapbox)
mapbox_access_token = {}

[download]
; Number of concurrent tile fetches (1-256)
workers = {}
; HTTP request timeout in seconds
timeout = {}
; Capacity of the fetch and write queues. Empty sizes them to the tile count.
queue_capacity = {}

[logging]
; Log file path
file = {}
"#,
        config.source.source_type,
        url,
        format,
        mapbox_access_token,
        config.download.workers,
        config.download.timeout,
        queue_capacity,
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, replacing the home directory with ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ImageFormat;

    #[test]
    fn test_defaults_serialize_empty_optionals() {
        let content = to_config_string(&ConfigFile::default());

        assert!(content.contains("type = osm\n"));
        assert!(content.contains("url = \n"));
        assert!(content.contains("format = \n"));
        assert!(content.contains("queue_capacity = \n"));
        assert!(content.contains("workers = 20\n"));
    }

    #[test]
    fn test_values_are_written() {
        let mut config = ConfigFile::default();
        config.source.url = Some("https://t.example.com/{z}/{x}/{y}.jpg".to_string());
        config.source.format = Some(ImageFormat::Jpg);
        config.download.queue_capacity = Some(32);

        let content = to_config_string(&config);

        assert!(content.contains("url = https://t.example.com/{z}/{x}/{y}.jpg\n"));
        assert!(content.contains("format = jpg\n"));
        assert!(content.contains("queue_capacity = 32\n"));
    }

    #[test]
    fn test_home_paths_use_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path_to_string(&home.join("logs/a.log")), "~/logs/a.log");
        }
        assert_eq!(path_to_string(Path::new("/var/log/a.log")), "/var/log/a.log");
    }
}
