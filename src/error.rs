use thiserror::Error;
use validator::ValidationError;

/// Errors surfaced by a single characteristic operation or by accessory construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightError {
    /// Required configuration is missing or malformed. Fatal at startup
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The request never produced an http response (dns, refused connection, timeout)
    #[error("Unable to reach device: {0}")]
    Transport(String),

    /// The device answered with a status code outside of 2xx
    #[error("Received HTTP error code {code}: \"{body}\"")]
    HttpStatus { code: u16, body: String },

    /// The device returned something which isn't a six digit hex color
    #[error("Invalid color format: '{0}'")]
    InvalidColorFormat(String),

    /// A characteristic value is out of range or couldn't be parsed
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl LightError {
    pub fn configuration(field: &str, reason: &str) -> Self {
        LightError::Configuration(format!("'{field}' {reason}"))
    }
}

impl From<ValidationError> for LightError {
    fn from(err: ValidationError) -> Self {
        LightError::InvalidValue(err.code.to_string())
    }
}

pub trait LightErrorExt {
    fn is_transport(&self) -> bool;

    fn is_http_status(&self) -> bool;
}

impl<T> LightErrorExt for Result<T, LightError> {
    fn is_transport(&self) -> bool {
        matches!(self, Err(LightError::Transport(_)))
    }

    fn is_http_status(&self) -> bool {
        matches!(self, Err(LightError::HttpStatus { .. }))
    }
}
