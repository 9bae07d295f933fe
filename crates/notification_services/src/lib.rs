//! # Notification Services
//!
//! This crate delivers device alerts over SMS.
//! It includes the Luosimao SMS client, a mock client for unconfigured setups, and the
//! [`Notifier`] seam the uptime monitor talks to.

/// Notifier trait and the SMS-backed notifier.
pub mod service;
/// SMS service trait and provider implementations.
pub mod sms_service;
/// Types, configuration and errors shared by the notification services.
pub mod types;

pub use service::{Notifier, SmsNotifier};
pub use sms_service::{LuosimaoSmsService, MockSmsService, SmsService};
pub use types::{LUOSIMAO_SEND_URL, NotificationError, ProviderResponse, SmsConfig};
