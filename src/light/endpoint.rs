use std::fmt::Display;
use log::warn;
use regex::Regex;
use crate::config::{BodyPattern, BrightnessConfig, ColorConfig, LightConfig, StatusSource, SwitchConfig};
use crate::error::LightError;

/// Placeholder which gets replaced by the value in set url templates
pub const PLACEHOLDER: &str = "%s";

/// Body the device answers with when the light is on and no custom rule is configured
const DEFAULT_POWER_BODY: &str = "1";

/// Rule deciding whether a power status body means "on"
#[derive(Debug, Clone)]
pub enum ResponseMatch {
    Contains(String),
    Pattern(Regex),
}

impl ResponseMatch {
    pub fn matches(&self, body: &str) -> bool {
        match self {
            ResponseMatch::Contains(literal) => body.contains(literal.as_str()),
            ResponseMatch::Pattern(regex) => regex.is_match(body),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResponseMatch::Contains(literal) => literal,
            ResponseMatch::Pattern(regex) => regex.as_str(),
        }
    }

    fn from_pattern(pattern: Option<&BodyPattern>) -> Self {
        match pattern {
            Some(BodyPattern::Text(pattern)) => match Regex::new(pattern) {
                Ok(regex) => ResponseMatch::Pattern(regex),
                Err(err) => {
                    warn!("Ignoring invalid switch.status.bodyRegEx '{pattern}': {err}");
                    ResponseMatch::default()
                }
            },
            Some(BodyPattern::Unsupported(_)) => {
                warn!("switch.status.bodyRegEx has to be a string, falling back to /{DEFAULT_POWER_BODY}/");
                ResponseMatch::default()
            }
            None => ResponseMatch::default(),
        }
    }
}

impl Default for ResponseMatch {
    fn default() -> Self {
        ResponseMatch::Contains(String::from(DEFAULT_POWER_BODY))
    }
}

/// A single GET endpoint. The method is always GET so it isn't stored
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub url: String,
    pub response_match: ResponseMatch,
}

impl EndpointDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), response_match: ResponseMatch::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCredentials {
    pub id: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SwitchEndpoints {
    pub status: Option<EndpointDescriptor>,
    pub power_on: Option<String>,
    pub power_off: Option<String>,
    pub notification: Option<NotificationCredentials>,
}

#[derive(Debug, Clone)]
pub struct ColorEndpoint {
    pub get: EndpointDescriptor,
    pub set_url_template: String,
    /// Brightness is carried by the rgb value instead of a dedicated endpoint
    pub brightness: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BrightnessEndpoint {
    pub status: Option<EndpointDescriptor>,
    pub set_url_template: Option<String>,
}

/// Canonical endpoints of one light. Built once, never re-inspected
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub switch: SwitchEndpoints,
    pub color: ColorEndpoint,
    pub brightness: BrightnessEndpoint,
}

impl Endpoints {
    pub fn from_config(config: &LightConfig) -> Result<Self, LightError> {
        Ok(Self {
            switch: SwitchEndpoints::from_config(&config.switch),
            color: ColorEndpoint::from_config(config.color.as_ref())?,
            brightness: BrightnessEndpoint::from_config(config.brightness.as_ref())?,
        })
    }
}

impl SwitchEndpoints {
    pub fn from_config(config: &SwitchConfig) -> Self {
        let (url, pattern) = match &config.status {
            Some(StatusSource::Url(url)) => (Some(url.as_str()), None),
            Some(StatusSource::Detailed { url, body_regex }) => {
                (url.as_deref().or(config.url.as_deref()), body_regex.as_ref())
            }
            None => (config.url.as_deref(), None),
        };

        let response_match = ResponseMatch::from_pattern(pattern);
        let status = match non_empty(url) {
            Some(url) => Some(EndpointDescriptor { url: url.to_string(), response_match }),
            None => {
                warn!("No switch.status url configured, power state can't be read");
                None
            }
        };

        let notification = non_empty(config.notification_id.as_deref()).map(|id| NotificationCredentials {
            id: id.to_string(),
            password: config.notification_password.clone(),
        });

        Self {
            status,
            power_on: non_empty(config.power_on.as_deref()).map(String::from),
            power_off: non_empty(config.power_off.as_deref()).map(String::from),
            notification,
        }
    }
}

impl ColorEndpoint {
    pub fn from_config(config: Option<&ColorConfig>) -> Result<Self, LightError> {
        let config = config.ok_or_else(|| LightError::configuration("color", "is missing"))?;

        let set_url_template = non_empty(config.url.as_ref().map(|source| source.url()))
            .ok_or_else(|| LightError::configuration("color.url", "is missing"))?;
        check_template("color.url", set_url_template);

        // legacy configs only have a single url which is used for reading as well
        let get_url = non_empty(config.status.as_ref().map(|source| source.url())).unwrap_or(set_url_template);

        Ok(Self {
            get: EndpointDescriptor::new(get_url),
            set_url_template: set_url_template.to_string(),
            brightness: config.brightness,
        })
    }
}

impl BrightnessEndpoint {
    pub fn from_config(config: Option<&BrightnessConfig>) -> Result<Self, LightError> {
        let Some(config) = config else {
            return Ok(Self::default());
        };

        let set_url_template = non_empty(config.url.as_deref());
        if let Some(template) = set_url_template {
            check_template("brightness.url", template);
        }

        Ok(Self {
            status: non_empty(config.status.as_deref()).map(EndpointDescriptor::new),
            set_url_template: set_url_template.map(String::from),
        })
    }
}

/// Substitute the placeholder of a set url template
pub fn fill(template: &str, value: impl Display) -> String {
    template.replacen(PLACEHOLDER, &value.to_string(), 1)
}

/// Templates without exactly one placeholder are kept, only the first one is ever filled
fn check_template(field: &str, template: &str) {
    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders != 1 {
        warn!("{field} '{template}' contains {placeholders} '{PLACEHOLDER}' placeholders instead of one");
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use super::*;

    fn test_config() -> Value {
        json!({
            "service": "Light",
            "name": "Light A",
            "switch": {
                "status": "http://localhost8080/power/status",
                "notificationID": "notification-id-light-a",
                "notificationPassword": "notification-password",
                "powerOn": "http://localhost:8080/power/set/on",
                "powerOff": "http://localhost:8080/power/set/off"
            },
            "color": {
                "status": "http://localhost:8080/color/status",
                "url": "http://localhost:8080/color/set/%s",
                "brightness": false
            },
            "brightness": {
                "status": "http://localhost:8080/brightness/status",
                "url": "http://localhost:8080/brightness/set/%s"
            }
        })
    }

    fn endpoints(value: Value) -> Result<Endpoints, LightError> {
        let config: LightConfig = serde_json::from_value(value).unwrap();
        Endpoints::from_config(&config)
    }

    #[test]
    fn bare_status_url_defaults_to_literal_one() {
        let endpoints = endpoints(test_config()).unwrap();
        let status = endpoints.switch.status.unwrap();
        assert_eq!(status.url, "http://localhost8080/power/status");
        assert_eq!(status.response_match.as_str(), "1");
        assert!(status.response_match.matches("1"));
        assert!(!status.response_match.matches("0"));
    }

    #[test]
    fn body_regex_becomes_rule() {
        let mut config = test_config();
        config["switch"]["status"] = json!({ "url": "http://light/power", "bodyRegEx": "\"switch\": \"on\"" });

        let status = endpoints(config).unwrap().switch.status.unwrap();
        assert_eq!(status.response_match.as_str(), "\"switch\": \"on\"");
        assert!(status.response_match.matches("{\"switch\": \"on\"}"));
        assert!(!status.response_match.matches("{\"switch\": \"off\"}"));
    }

    #[test]
    fn object_status_borrows_switch_url() {
        let mut config = test_config();
        config["switch"]["url"] = json!("http://light/power");
        config["switch"]["status"] = json!({ "bodyRegEx": "on" });

        let status = endpoints(config).unwrap().switch.status.unwrap();
        assert_eq!(status.url, "http://light/power");
        assert_eq!(status.response_match.as_str(), "on");
    }

    #[test]
    fn missing_or_invalid_body_regex_falls_back() {
        for body_regex in [Value::Null, json!(7), json!("(unclosed")] {
            let mut config = test_config();
            config["switch"]["status"] = json!({ "url": "http://light/power", "bodyRegEx": body_regex });

            let status = endpoints(config).unwrap().switch.status.unwrap();
            assert_eq!(status.response_match.as_str(), "1");
        }

        let mut config = test_config();
        config["switch"]["status"] = json!({ "url": "http://light/power" });
        let status = endpoints(config).unwrap().switch.status.unwrap();
        assert!(status.response_match.matches("1"));
    }

    #[test]
    fn legacy_and_structured_color_url_agree() {
        let legacy = endpoints(test_config()).unwrap();

        let mut config = test_config();
        config["color"]["url"] = json!({ "url": "http://localhost:8080/color/set/%s" });
        let structured = endpoints(config).unwrap();

        assert_eq!(legacy.color.set_url_template, "http://localhost:8080/color/set/%s");
        assert_eq!(legacy.color.set_url_template, structured.color.set_url_template);
        assert_eq!(legacy.color.get.url, "http://localhost:8080/color/status");
    }

    #[test]
    fn color_url_doubles_as_status_without_status() {
        let mut config = test_config();
        config["color"] = json!({ "url": "http://light/color/%s" });

        let color = endpoints(config).unwrap().color;
        assert_eq!(color.get.url, "http://light/color/%s");
        assert!(!color.brightness);
    }

    #[test]
    fn missing_color_url_is_fatal() {
        let mut config = test_config();
        config["color"] = json!({ "status": "http://light/color" });
        assert_eq!(
            endpoints(config).unwrap_err(),
            LightError::configuration("color.url", "is missing")
        );

        let mut config = test_config();
        config.as_object_mut().unwrap().remove("color");
        assert!(matches!(endpoints(config), Err(LightError::Configuration(_))));
    }

    #[test]
    fn structured_color_url_without_placeholder() {
        let mut config = test_config();
        config["color"]["url"] = json!({ "url": "http://example.com" });

        let color = endpoints(config).unwrap().color;
        assert_eq!(color.set_url_template, "http://example.com");
        assert_eq!(color.get.url, "http://localhost:8080/color/status");
        assert_eq!(fill(&color.set_url_template, "ff0000"), "http://example.com");
    }

    #[test]
    fn brightness_url_placeholder_count_is_not_fatal() {
        let mut config = test_config();
        config["brightness"]["url"] = json!("http://light/%s/%s");

        let brightness = endpoints(config).unwrap().brightness;
        assert_eq!(brightness.set_url_template.as_deref(), Some("http://light/%s/%s"));
        assert_eq!(fill("http://light/%s/%s", 50), "http://light/50/%s");
    }

    #[test]
    fn empty_color_url_is_fatal() {
        let mut config = test_config();
        config["color"]["url"] = json!({ "url": "  " });
        assert_eq!(
            endpoints(config).unwrap_err(),
            LightError::configuration("color.url", "is missing")
        );
    }

    #[test]
    fn notification_credentials() {
        let switch = endpoints(test_config()).unwrap().switch;
        assert_eq!(switch.notification, Some(NotificationCredentials {
            id: String::from("notification-id-light-a"),
            password: Some(String::from("notification-password")),
        }));
    }

    #[test]
    fn fill_replaces_first_placeholder() {
        assert_eq!(fill("http://light/brightness/%s", 100), "http://light/brightness/100");
        assert_eq!(fill("http://light/color/%s", "ff8000"), "http://light/color/ff8000");
    }
}
