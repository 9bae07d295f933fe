use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http_probe::{HttpProber, Target};

/// Confirmed or observed condition of the monitored device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// The endpoint answered with an accepted status code.
    Online,
    /// The endpoint was unreachable or answered with anything else.
    Offline,
}

impl From<bool> for DeviceState {
    fn from(up: bool) -> Self {
        if up {
            DeviceState::Online
        } else {
            DeviceState::Offline
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Online => write!(f, "online"),
            DeviceState::Offline => write!(f, "offline"),
        }
    }
}

/// A committed change of the confirmed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State before the change.
    pub from: DeviceState,
    /// State after the change.
    pub to: DeviceState,
}

impl Transition {
    /// Alert text sent for this transition.
    pub fn alert_message(&self, target_label: &str, device_name: &str) -> String {
        format!(
            "Your device [{}]({}) is {}, please note",
            target_label, device_name, self.to
        )
    }
}

/// What a single poll of the loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The probe agreed with the confirmed state.
    Steady(DeviceState),
    /// The probe disagreed, but a re-probe inside the window agreed again.
    FlapAbsorbed(DeviceState),
    /// Every re-probe in the window agreed with the new state.
    Transitioned(Transition),
}

impl PollOutcome {
    /// Confirmed state after this poll.
    pub fn state(&self) -> DeviceState {
        match self {
            PollOutcome::Steady(state) | PollOutcome::FlapAbsorbed(state) => *state,
            PollOutcome::Transitioned(transition) => transition.to,
        }
    }
}

/// Configuration for the uptime monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// `address:port` shown in alerts
    pub target_label: String,

    /// Device name shown in alerts
    pub device_name: String,

    /// Consecutive agreeing re-probes required to confirm a change (default: 10)
    pub confirm_time: u32,

    /// Delay between polls, also used between re-probes (default: 6 seconds)
    pub confirm_delay: Duration,
}

impl MonitorConfig {
    /// Configuration for `target` with the default confirmation window.
    pub fn for_target(target: &Target, device_name: impl Into<String>) -> Self {
        Self {
            target_label: target.to_string(),
            device_name: device_name.into(),
            ..Self::default()
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_label: "127.0.0.1:80".to_string(),
            device_name: "device".to_string(),
            confirm_time: 10,
            confirm_delay: Duration::from_secs(6),
        }
    }
}

/// Source of raw UP/DOWN readings for the loop.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Takes one reading; `true` means UP.
    async fn probe(&self) -> bool;
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self) -> bool {
        HttpProber::probe(self).await
    }
}
