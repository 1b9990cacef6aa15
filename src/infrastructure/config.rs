// Render-service settings
use serde::Deserialize;

/// Settings for the remote rendering service, loaded from an optional
/// config/quickchart.toml. Every field has a default so the binary runs
/// with no config file at all.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RenderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            width: default_width(),
            height: default_height(),
            format: default_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://quickchart.io".to_string()
}

fn default_width() -> u32 {
    1400
}

fn default_height() -> u32 {
    700
}

fn default_format() -> String {
    "png".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

pub fn load_render_settings() -> anyhow::Result<RenderSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/quickchart").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let settings: RenderSettings = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.base_url, "https://quickchart.io");
        assert_eq!(settings.width, 1400);
        assert_eq!(settings.height, 700);
        assert_eq!(settings.format, "png");
        assert_eq!(settings.timeout_secs, 30);
    }
}
