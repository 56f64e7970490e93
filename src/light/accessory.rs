use std::sync::Arc;
use log::{debug, error, info};
use serde::Serialize;
use tokio::sync::Mutex;
use crate::config::LightConfig;
use crate::error::LightError;
use crate::light::color::{self, Hsb, Rgb};
use crate::light::endpoint::{fill, Endpoints};
use crate::light::http::HttpTransport;
use crate::light::state::CachedColorState;
use crate::light::validation::{validate_brightness, validate_hue, validate_saturation};

/// Operation name every color write is logged under, whichever setter triggered it
const SET_RGB: &str = "setRGB";
use crate::light::{Characteristic, CharacteristicValue};

/// Receives the notification credentials once the host finished launching
pub trait NotificationRegistrar: Send + Sync {
    fn register(&self, notification_id: &str, notification_password: Option<&str>);
}

/// Identification shown by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessoryInformation {
    pub name: String,
    pub service: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_revision: String,
}

/// A rgb light exposed as power, hue, saturation and brightness characteristics
///
/// All operations lock the cached color for their whole duration, network round
/// trip included, so operations on one accessory never interleave
pub struct LightAccessory<T> {
    name: String,
    service: String,
    endpoints: Endpoints,
    transport: T,
    registrar: Option<Arc<dyn NotificationRegistrar>>,
    cache: Mutex<CachedColorState>,
}

impl<T: HttpTransport> LightAccessory<T> {
    pub fn new(
        config: &LightConfig,
        transport: T,
        registrar: Option<Arc<dyn NotificationRegistrar>>,
    ) -> Result<Self, LightError> {
        let endpoints = Endpoints::from_config(config)?;
        debug!("Resolved endpoints for '{}': {endpoints:?}", config.name);

        Ok(Self {
            name: config.name.clone(),
            service: config.service.clone(),
            endpoints,
            transport,
            registrar,
            cache: Mutex::new(CachedColorState::default()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn cached_color(&self) -> CachedColorState {
        *self.cache.lock().await
    }

    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation {
            name: self.name.clone(),
            service: self.service.clone(),
            manufacturer: env!("CARGO_PKG_AUTHORS").to_string(),
            model: env!("CARGO_PKG_NAME").to_string(),
            serial_number: String::from("001"),
            firmware_revision: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Hook for the host's "finished launching" signal
    ///
    /// Registering is skipped silently without a registrar or without a notification id
    pub fn did_finish_launching(&self) {
        let Some(registrar) = &self.registrar else {
            debug!("No notification registrar available, skipping registration");
            return;
        };
        let Some(notification) = &self.endpoints.switch.notification else {
            debug!("No switch.notificationID configured, skipping registration");
            return;
        };

        info!("Registering '{}' for push notifications as '{}'", self.name, notification.id);
        registrar.register(&notification.id, notification.password.as_deref());
    }

    pub async fn get(&self, characteristic: Characteristic) -> Result<CharacteristicValue, LightError> {
        debug!("Reading characteristic {characteristic}");
        Ok(match characteristic {
            Characteristic::Power => CharacteristicValue::Power(self.get_power_state().await?),
            Characteristic::Hue => CharacteristicValue::Hue(self.get_hue().await?),
            Characteristic::Saturation => CharacteristicValue::Saturation(self.get_saturation().await?),
            Characteristic::Brightness => CharacteristicValue::Brightness(self.get_brightness().await?),
        })
    }

    pub async fn get_power_state(&self) -> Result<bool, LightError> {
        let _cache = self.cache.lock().await;
        let status = self.endpoints.switch.status.as_ref()
            .ok_or_else(|| LightError::configuration("switch.status", "is not configured"))?;

        let body = self.request("getPowerState", &status.url).await?;
        let on = status.response_match.matches(&body);
        debug!("getPowerState() matched '{body}' against /{}/", status.response_match.as_str());
        info!("power is currently {}", on_off(on));
        Ok(on)
    }

    pub async fn set_power_state(&self, on: bool) -> Result<(), LightError> {
        let _cache = self.cache.lock().await;
        let (field, url) = if on {
            ("switch.powerOn", &self.endpoints.switch.power_on)
        } else {
            ("switch.powerOff", &self.endpoints.switch.power_off)
        };
        let url = url.as_deref().ok_or_else(|| LightError::configuration(field, "is not configured"))?;

        self.request("setPowerState", url).await?;
        info!("setPowerState() successfully set to {}", on_off(on));
        Ok(())
    }

    /// Read the full color with a single request
    pub async fn get_color(&self) -> Result<Hsb, LightError> {
        let mut cache = self.cache.lock().await;
        let (hsb, rgb) = self.read_color("getColor", &mut cache).await?;
        info!("... color is currently H:{:.0} S:{:.0} B:{:.0}. RGB: {}", hsb.hue, hsb.saturation, hsb.brightness, rgb.to_hex());
        Ok(hsb)
    }

    pub async fn get_hue(&self) -> Result<f64, LightError> {
        let mut cache = self.cache.lock().await;
        let (hsb, rgb) = self.read_color("getHue", &mut cache).await?;
        let hue = hsb.hue.round();
        info!("... hue is currently {hue}. RGB: {}", rgb.to_hex());
        Ok(hue)
    }

    pub async fn get_saturation(&self) -> Result<f64, LightError> {
        let mut cache = self.cache.lock().await;
        let (hsb, rgb) = self.read_color("getSaturation", &mut cache).await?;
        let saturation = hsb.saturation.round();
        info!("... saturation is currently {saturation}. RGB: {}", rgb.to_hex());
        Ok(saturation)
    }

    /// Read the brightness either from the dedicated brightness endpoint or from the rgb value
    pub async fn get_brightness(&self) -> Result<u8, LightError> {
        let mut cache = self.cache.lock().await;

        let status = self.endpoints.brightness.status.as_ref().filter(|_| !self.endpoints.color.brightness);
        if let Some(status) = status {
            let body = self.request("getBrightness", &status.url).await?;
            let brightness = parse_brightness(&body)?;
            cache.brightness = brightness as f64;
            info!("brightness is currently {brightness}%");
            return Ok(brightness);
        }

        let (hsb, rgb) = self.read_color("getBrightness", &mut cache).await?;
        let brightness = hsb.brightness.round() as u8;
        info!("... brightness is currently {brightness}. RGB: {}", rgb.to_hex());
        Ok(brightness)
    }

    pub async fn set_brightness(&self, brightness: u8) -> Result<(), LightError> {
        validate_brightness(brightness)?;
        let template = if self.endpoints.color.brightness {
            None
        } else {
            let template = self.endpoints.brightness.set_url_template.as_deref()
                .ok_or_else(|| LightError::configuration("brightness.url", "is required unless color.brightness is enabled"))?;
            Some(template)
        };
        let mut cache = self.cache.lock().await;

        info!("Caching Brightness as {brightness} ...");
        cache.brightness = brightness as f64;

        let Some(template) = template else {
            info!("Setting brightness via RGB.");
            return self.write_color(&cache).await;
        };

        self.request("setBrightness", &fill(template, brightness)).await?;
        info!("setBrightness() successfully set to {brightness}%");
        Ok(())
    }

    pub async fn set_hue(&self, hue: f64) -> Result<(), LightError> {
        validate_hue(hue)?;
        let mut cache = self.cache.lock().await;

        info!("Caching Hue as {hue} ...");
        cache.hue = hue;
        self.write_color(&cache).await
    }

    pub async fn set_saturation(&self, saturation: f64) -> Result<(), LightError> {
        validate_saturation(saturation)?;
        let mut cache = self.cache.lock().await;

        info!("Caching Saturation as {saturation} ...");
        cache.saturation = saturation;
        self.write_color(&cache).await
    }

    async fn read_color(&self, operation: &str, cache: &mut CachedColorState) -> Result<(Hsb, Rgb), LightError> {
        let body = self.request(operation, &self.endpoints.color.get.url).await?;
        let rgb = color::parse_hex(&body).inspect_err(|err| error!("{operation}() failed: {err}"))?;

        let hsb = color::rgb_to_hsb(rgb);
        cache.update(hsb);
        Ok((hsb, rgb))
    }

    async fn write_color(&self, cache: &CachedColorState) -> Result<(), LightError> {
        let hex = cache.rgb().to_hex();
        info!("converting H:{} S:{} B:{} to RGB:{hex} ...", cache.hue, cache.saturation, cache.brightness);

        self.request(SET_RGB, &fill(&self.endpoints.color.set_url_template, &hex)).await?;
        info!("... {SET_RGB}() successfully set");
        Ok(())
    }

    async fn request(&self, operation: &str, url: &str) -> Result<String, LightError> {
        debug!("{operation}() requesting {url}");
        self.transport.get(url).await.into_body().inspect_err(|err| match err {
            LightError::HttpStatus { code, body } => {
                error!("{operation}() returned HTTP error code: {code}: \"{body}\"")
            }
            err => error!("{operation}() failed: {err}"),
        })
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Devices may report fractional percentages, those are rounded
fn parse_brightness(body: &str) -> Result<u8, LightError> {
    let body = body.trim();
    let brightness = body.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LightError::InvalidValue(format!("'{body}' is not a brightness")))?
        .round();
    if !(0.0..=100.0).contains(&brightness) {
        return Err(LightError::InvalidValue(format!("'{body}' is out of range")));
    }
    Ok(brightness as u8)
}
