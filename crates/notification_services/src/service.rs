use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::{NotificationError, SmsService};

/// Delivers an alert message to whoever watches the device.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message`. Failures are reported, never retried.
    async fn notify(&self, message: &str) -> Result<(), NotificationError>;
}

/// Notifier that texts a single configured phone number.
pub struct SmsNotifier {
    sms_service: Arc<dyn SmsService>,
    recipient: String,
}

impl SmsNotifier {
    /// Create a notifier sending through `sms_service` to `recipient`
    pub fn new(sms_service: Arc<dyn SmsService>, recipient: impl Into<String>) -> Self {
        Self {
            sms_service,
            recipient: recipient.into(),
        }
    }

    /// Phone number alerts are sent to
    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotificationError> {
        let receipt = self.sms_service.send_sms(&self.recipient, message).await?;
        info!("SMS sent successfully to {} ({})", self.recipient, receipt);
        Ok(())
    }
}
