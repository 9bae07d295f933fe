use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::{NotificationError, ProviderResponse, SmsConfig};

/// Upper bound on a single request to the SMS provider.
const SMS_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Trait for SMS service implementations
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Sends `message` to `to`, returning the provider's status message.
    async fn send_sms(&self, to: &str, message: &str) -> Result<String, NotificationError>;
}

/// Luosimao SMS gateway client
pub struct LuosimaoSmsService {
    client: Client,
    api_url: String,
    api_key: String,
    message_sign: String,
}

impl LuosimaoSmsService {
    /// Create a new Luosimao SMS service
    pub fn new(config: &SmsConfig) -> Result<Self, NotificationError> {
        let client = Client::builder().timeout(SMS_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a Luosimao SMS service on top of an existing HTTP client
    pub fn with_client(config: &SmsConfig, client: Client) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            message_sign: config.message_sign.clone(),
        }
    }

    /// Appends the sign the gateway requires at the end of every message.
    pub fn signed_message(&self, message: &str) -> String {
        format!("{}【{}】", message, self.message_sign)
    }
}

#[async_trait]
impl SmsService for LuosimaoSmsService {
    async fn send_sms(&self, to: &str, message: &str) -> Result<String, NotificationError> {
        let message = self.signed_message(message);
        info!("Sending SMS to {} with message: {}", to, message);

        let response = self
            .client
            .post(&self.api_url)
            .basic_auth("api", Some(format!("key-{}", self.api_key)))
            .form(&[("mobile", to), ("message", message.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("SMS provider responded with {}: {}", status, body);

        if !status.is_success() {
            return Err(NotificationError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let result: ProviderResponse = serde_json::from_str(&body)?;
        if result.error != 0 {
            return Err(NotificationError::Provider {
                code: result.error,
                message: result.msg,
            });
        }

        Ok(result.msg)
    }
}

/// Mock SMS service used when no provider is configured
#[derive(Default)]
pub struct MockSmsService {
    sent: AtomicU64,
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, to: &str, message: &str) -> Result<String, NotificationError> {
        info!("📱 [MOCK SMS] To: {}", to);
        info!("📱 [MOCK SMS] Message: {}", message);

        let sent = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("mock-sms-{}", sent))
    }
}
