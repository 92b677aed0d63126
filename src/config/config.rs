use crate::Result;
use crate::config::Color;
use crate::model::{AbilityTier, NUM_ABILITY_TIERS};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_status_message_interval() -> u64 {
    3
}

fn default_status_messages() -> Vec<String> {
    [
        "Swimming through the data reefs to find your answer...",
        "Diving deep into the developer ocean...",
        "Casting our net for the perfect tech talent...",
        "Reeling in the best developers for you...",
        "Exploring the code coral reefs for hidden gems...",
        "Navigating the sea of contribution histories...",
    ]
    .map(str::to_string)
    .to_vec()
}

/// Default colors for the ability tiers, lowest first: red, orange, gold, green
const fn default_colors_for_ability_tiers() -> [Color; NUM_ABILITY_TIERS] {
    [
        Color(Srgb::new(255, 0, 0)),   // Baseline
        Color(Srgb::new(255, 165, 0)), // Competent
        Color(Srgb::new(255, 215, 0)), // Strong
        Color(Srgb::new(0, 255, 0)),   // Exceptional
    ]
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the developer-search service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of seconds to wait for the search service before giving up
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Number of seconds between rotations of the pending status message
    #[serde(default = "default_status_message_interval")]
    pub status_message_interval: u64,

    /// Messages rotated while a search is pending
    #[serde(default = "default_status_messages")]
    pub status_messages: Vec<String>,

    /// Colors for the ability tiers, lowest tier first
    #[serde(default = "default_colors_for_ability_tiers")]
    pub colors_for_ability_tiers: [Color; NUM_ABILITY_TIERS],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            status_message_interval: default_status_message_interval(),
            status_messages: default_status_messages(),
            colors_for_ability_tiers: default_colors_for_ability_tiers(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(base_path: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading dev-scout configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                base_path.join("scout.toml"),
                base_path.join("scout.yml"),
                base_path.join("scout.yaml"),
                base_path.join("scout.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading dev-scout configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => {
                toml::to_string_pretty(self).into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?
            }
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Write the commented default configuration to a file
    ///
    /// YAML output preserves the embedded comments; other formats are
    /// serialized from the default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn write_default(output_path: &Utf8Path) -> Result<()> {
        match output_path.extension().unwrap_or_default() {
            "yml" | "yaml" => {
                fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
                Ok(())
            }
            _ => Self::default().save(output_path),
        }
    }

    /// The display color for an ability tier.
    #[must_use]
    pub const fn tier_color(&self, tier: AbilityTier) -> Srgb<u8> {
        self.colors_for_ability_tiers[tier.index()].0
    }

    fn validate(&self, warnings: &mut Vec<String>) {
        if Url::parse(&self.base_url).is_err() {
            warnings.push(format!("base_url is not a valid URL: {}", self.base_url));
        }

        if self.request_timeout == 0 {
            warnings.push("request_timeout is 0; every search will fail immediately".to_string());
        }

        if self.status_message_interval == 0 {
            warnings.push("status_message_interval is 0; using 1 second at runtime".to_string());
        }

        if self.status_messages.is_empty() {
            warnings.push("status_messages is empty; no status message will be shown while searching".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_config_file_exists() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let base = Utf8Path::from_path(dir.path()).expect("temp dir path is not UTF-8");

        let (config, warnings) = Config::load(base, None).expect("loading defaults must succeed");
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.status_messages.len(), 6);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_partial_toml_config() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let base = Utf8Path::from_path(dir.path()).expect("temp dir path is not UTF-8");
        fs::write(base.join("scout.toml"), "base_url = \"https://search.example.com\"\n").expect("failed to write config");

        let (config, warnings) = Config::load(base, None).expect("loading config must succeed");
        assert_eq!(config.base_url, "https://search.example.com");
        assert_eq!(config.request_timeout, 30);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_validation_warns_on_suspect_values() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let base = Utf8Path::from_path(dir.path()).expect("temp dir path is not UTF-8");
        fs::write(
            base.join("scout.yml"),
            "base_url: \"not a url\"\nrequest_timeout: 0\nstatus_messages: []\n",
        )
        .expect("failed to write config");

        let (_, warnings) = Config::load(base, None).expect("loading config must succeed");
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_embedded_default_yaml_matches_default_values() {
        let from_yaml: Config = serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("embedded default config must parse");
        let defaults = Config::default();
        assert_eq!(from_yaml.base_url, defaults.base_url);
        assert_eq!(from_yaml.request_timeout, defaults.request_timeout);
        assert_eq!(from_yaml.status_message_interval, defaults.status_message_interval);
        assert_eq!(from_yaml.status_messages, defaults.status_messages);
        assert_eq!(from_yaml.colors_for_ability_tiers, defaults.colors_for_ability_tiers);
    }
}
