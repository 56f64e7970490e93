use std::future::Future;
use std::time::Duration;
use log::debug;
use crate::error::LightError;

/// Classified result of a single GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    /// 2xx response
    Success(String),
    /// Any other response status
    Status { code: u16, body: String },
    /// No response at all
    Transport(String),
}

impl HttpOutcome {
    pub fn from_response(code: u16, body: String) -> Self {
        if (200..300).contains(&code) {
            HttpOutcome::Success(body)
        } else {
            HttpOutcome::Status { code, body }
        }
    }

    pub fn into_body(self) -> Result<String, LightError> {
        match self {
            HttpOutcome::Success(body) => Ok(body),
            HttpOutcome::Status { code, body } => Err(LightError::HttpStatus { code, body }),
            HttpOutcome::Transport(message) => Err(LightError::Transport(message)),
        }
    }
}

/// Issues GET requests with an empty body. Implementations never retry
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = HttpOutcome> + Send;
}

/// [`HttpTransport`] backed by a shared reqwest client
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, LightError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|err| LightError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> HttpOutcome {
        debug!("GET {url}");
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => return HttpOutcome::Transport(err.to_string()),
        };

        let code = response.status().as_u16();
        match response.text().await {
            Ok(body) => HttpOutcome::from_response(code, body),
            Err(err) => HttpOutcome::Transport(err.to_string()),
        }
    }
}
