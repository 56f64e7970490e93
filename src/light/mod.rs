use std::sync::Arc;
use enum_stringify::EnumStringify;
use log::info;
use serde::Serialize;
use crate::config::LightConfig;
use crate::error::LightError;
use crate::light::accessory::{LightAccessory, NotificationRegistrar};
use crate::light::color::{hsb_to_rgb, Hsb, Rgb};
use crate::light::http::ReqwestTransport;

pub mod accessory;
pub mod color;
pub mod endpoint;
pub mod http;
pub mod print;
pub mod state;
pub mod validation;

/// Characteristics a light exposes to the host
#[derive(EnumStringify, clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Characteristic {
    Power,
    Hue,
    Saturation,
    Brightness,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(untagged)]
pub enum CharacteristicValue {
    Power(bool),
    Hue(f64),
    Saturation(f64),
    Brightness(u8),
}

/// Snapshot of power state and color, as printed by the `status` command
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LightStatus {
    pub name: String,
    pub on: bool,
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    #[serde(skip)]
    pub rgb: Rgb,
    #[serde(rename = "rgb")]
    pub hex: String,
}

impl LightStatus {
    pub fn new(name: impl Into<String>, on: bool, color: Hsb) -> Self {
        let rgb = hsb_to_rgb(color);
        Self {
            name: name.into(),
            on,
            hue: color.hue.round(),
            saturation: color.saturation.round(),
            brightness: color.brightness.round(),
            rgb,
            hex: rgb.to_hex(),
        }
    }
}

/// Build an accessory talking to the real device over http
pub fn connect(
    config: &LightConfig,
    registrar: Option<Arc<dyn NotificationRegistrar>>,
) -> Result<LightAccessory<ReqwestTransport>, LightError> {
    let transport = ReqwestTransport::new(config.request_timeout())?;
    let accessory = LightAccessory::new(config, transport, registrar)?;
    info!("Initialized {} accessory '{}'", config.service, config.name);
    Ok(accessory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristic_names() {
        assert_eq!(Characteristic::Brightness.to_string(), "Brightness");
        assert_eq!(Characteristic::Power.to_string(), "Power");
    }

    #[test]
    fn status_serializes_hex() {
        let status = LightStatus::new("Desk", true, Hsb::new(240.0, 100.0, 50.0));
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["rgb"], "000080");
        assert_eq!(json["on"], true);
        assert_eq!(json["brightness"], 50.0);
    }

    #[test]
    fn connect_rejects_incomplete_config() {
        let config = LightConfig::from_json(r#"{ "name": "Desk", "color": { "status": "http://desk/color" } }"#).unwrap();
        assert!(matches!(connect(&config, None), Err(LightError::Configuration(_))));
    }
}
