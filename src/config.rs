use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::Context;
use log::debug;
use serde::Deserialize;
use validator::Validate;

const CONFIG_PATH: &str = "httprgb/config.toml";

/// Raw accessory configuration as the host hands it over
///
/// Several fields accept either a bare url string (legacy style) or a structured
/// object. They are kept as-is here and resolved once by [`crate::light::endpoint`]
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct LightConfig {
    #[serde(default = "default_service")]
    pub service: String,
    #[validate(length(min = 1, message = "Accessory name must not be empty"))]
    pub name: String,
    /// Request timeout in milliseconds
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub switch: SwitchConfig,
    pub color: Option<ColorConfig>,
    pub brightness: Option<BrightnessConfig>,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwitchConfig {
    pub status: Option<StatusSource>,
    /// Fallback status url for the object form of `status`
    pub url: Option<String>,
    #[serde(rename = "notificationID")]
    pub notification_id: Option<String>,
    pub notification_password: Option<String>,
    pub power_on: Option<String>,
    pub power_off: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum StatusSource {
    Url(String),
    Detailed {
        url: Option<String>,
        #[serde(rename = "bodyRegEx")]
        body_regex: Option<BodyPattern>,
    },
}

/// `bodyRegEx` as written in the config. Anything that isn't a string is kept
/// around only so that the default rule can be applied instead of failing
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum BodyPattern {
    Text(String),
    Unsupported(serde::de::IgnoredAny),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ColorConfig {
    pub status: Option<UrlSource>,
    pub url: Option<UrlSource>,
    /// Route brightness changes through the rgb endpoint
    #[serde(default)]
    pub brightness: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum UrlSource {
    Url(String),
    Detailed { url: String },
}

impl UrlSource {
    pub fn url(&self) -> &str {
        match self {
            UrlSource::Url(url) => url,
            UrlSource::Detailed { url } => url,
        }
    }
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct BrightnessConfig {
    pub status: Option<String>,
    pub url: Option<String>,
}

impl LightConfig {
    /// Location used when no `--config` is passed
    pub fn default_path() -> PathBuf {
        dirs::config_dir().unwrap_or_default().join(CONFIG_PATH)
    }

    /// Read and validate the configuration file
    ///
    /// Files ending in `.json` are parsed as json (the format home automation hosts
    /// use), everything else as toml
    pub fn load(alternative_path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match alternative_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path(),
        };

        debug!("Reading config file at {path:?}");
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Missing configuration file at '{}'", path.to_string_lossy()))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_toml(&content)?
        };

        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: LightConfig = serde_json::from_str(content).context("Config file doesn't match config definition")?;
        config.validate().context("Config file contains invalid values")?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: LightConfig = toml::from_str(content).context("Config file doesn't match config definition")?;
        config.validate().context("Config file contains invalid values")?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_millis)
    }
}

fn default_service() -> String {
    String::from("Light")
}
