use serde::Deserialize;

/// Default endpoint of the Luosimao SMS gateway.
pub const LUOSIMAO_SEND_URL: &str = "https://sms-api.luosimao.com/v1/send.json";

/// Errors raised while delivering an alert.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// A required setting is absent from the environment.
    #[error("{0} environment variable not set")]
    MissingConfig(&'static str),

    /// The request to the SMS provider could not be completed.
    #[error("SMS request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The SMS provider answered with a non-success HTTP status.
    #[error("SMS provider returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The SMS provider answered with something that is not its JSON payload.
    #[error("Invalid SMS provider response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The SMS provider rejected the message.
    #[error("SMS provider error {code}: {message}")]
    Provider {
        /// Provider error code, non-zero.
        code: i64,
        /// Provider error message.
        message: String,
    },
}

/// JSON payload returned by the SMS provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Zero on success.
    pub error: i64,
    /// Human readable status.
    #[serde(default)]
    pub msg: String,
}

/// Settings needed to send SMS alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsConfig {
    /// Provider endpoint, [`LUOSIMAO_SEND_URL`] unless overridden.
    pub api_url: String,
    /// Provider API key, without the `key-` prefix.
    pub api_key: String,
    /// Recipient phone number.
    pub phone_number: String,
    /// Sign appended to every message as `【sign】`.
    pub message_sign: String,
}

impl SmsConfig {
    /// Reads the SMS settings from the process environment.
    pub fn from_env() -> Result<Self, NotificationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the SMS settings through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotificationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(NotificationError::MissingConfig(key))
        };

        Ok(Self {
            api_url: lookup("SMS_API_URL")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| LUOSIMAO_SEND_URL.to_string()),
            api_key: require("LUOSIMAO_API_KEY")?,
            phone_number: require("ALERT_PHONE_NUMBER")?,
            message_sign: require("ALERT_MESSAGE_SIGN")?,
        })
    }
}
