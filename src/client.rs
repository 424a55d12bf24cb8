use std::sync::Arc;
use std::time::{Duration, Instant};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use url::Url;

use crate::chat::ChatConfig;
use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_MISSING_REPLY, CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS,
};
use crate::spinner::Spinner;

/// Query parameter that carries the prompt.
const PROMPT_PARAM: &str = "sh";

/// Field of the response object that holds the reply.
pub const REPLY_FIELD: &str = "Javob";

/// Reply substituted when the response object has no reply field.
pub const MISSING_REPLY_FALLBACK: &str = "Xato: API javobida 'Javob' maydoni topilmadi.";

/// Everything except unreserved characters and `/` is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Client for the chat endpoint.
///
/// One call to [`send`](AuraClient::send) is exactly one GET request; there is no retry.
#[derive(Clone)]
pub struct AuraClient {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    spinner_interval: Duration,
    use_color: bool,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl AuraClient {
    /// Create a new client from the session configuration.
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let timeout = config.request_timeout;
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            timeout,
            spinner_interval: config.spinner_interval,
            use_color: config.use_color,
            logger: None,
        })
    }

    /// Install a logger that observes every exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL a prompt is sent to: the base URL with the prompt percent-encoded
    /// as its only query parameter.
    pub fn request_url(&self, prompt_text: &str) -> Result<Url> {
        let encoded = utf8_percent_encode(prompt_text, QUERY_VALUE);
        Ok(Url::parse(&format!(
            "{}?{}={}",
            self.base_url, PROMPT_PARAM, encoded
        ))?)
    }

    /// Send a prompt and return the reply text.
    ///
    /// A spinner runs on the terminal for the duration of the request and has been
    /// stopped and joined by the time this returns, whatever the outcome.
    pub async fn send(&self, prompt_text: &str) -> Result<String> {
        CLIENT_REQUESTS.click();
        let started = Instant::now();

        let spinner = Spinner::start(self.spinner_interval, self.use_color);
        let outcome = self.dispatch(prompt_text).await;
        spinner.stop();

        CLIENT_REQUEST_DURATION.add(started.elapsed().as_secs_f64());
        match &outcome {
            Ok(reply) => {
                if let Some(logger) = &self.logger {
                    logger.log_reply(reply);
                }
            }
            Err(err) => {
                CLIENT_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_error(err);
                }
            }
        }
        outcome
    }

    async fn dispatch(&self, prompt_text: &str) -> Result<String> {
        let url = self.request_url(prompt_text).map_err(|e| {
            Error::request(format!("invalid request URL: {}", e), Some(Box::new(e)))
        })?;
        if let Some(logger) = &self.logger {
            logger.log_request(url.as_str(), prompt_text);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?
            .error_for_status()
            .map_err(|e| Error::request(format!("{}", e), Some(Box::new(e))))?;

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| self.transport_error(e))?;
        extract_reply(&body)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::request(
                format!(
                    "request timed out after {}s: {}",
                    self.timeout.as_secs_f64(),
                    e
                ),
                Some(Box::new(e)),
            )
        } else if e.is_connect() {
            Error::request(format!("connection failed: {}", e), Some(Box::new(e)))
        } else if e.is_decode() {
            Error::request(format!("malformed response body: {}", e), Some(Box::new(e)))
        } else {
            Error::request(format!("request failed: {}", e), Some(Box::new(e)))
        }
    }
}

/// Pull the reply out of a response body.
///
/// A missing reply field is not an error: the fixed fallback text stands in for the
/// reply.  Non-string values are returned as their JSON text, so `null` becomes
/// `"null"` and `true` becomes `"true"`.
pub fn extract_reply(body: &Value) -> Result<String> {
    let Value::Object(fields) = body else {
        return Err(Error::request(
            "malformed response body: expected a JSON object",
            None,
        ));
    };
    match fields.get(REPLY_FIELD) {
        Some(Value::String(reply)) => Ok(reply.clone()),
        Some(other) => Ok(other.to_string()),
        None => {
            CLIENT_MISSING_REPLY.click();
            Ok(MISSING_REPLY_FALLBACK.to_string())
        }
    }
}
