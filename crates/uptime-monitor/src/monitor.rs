use std::sync::Arc;

use log::{error, info};
use notification_services::Notifier;
use tokio::time::sleep;

use crate::monitor_types::*;

/// Debounce loop around a single probe target
pub struct UptimeMonitor {
    prober: Arc<dyn Probe>,
    notifier: Arc<dyn Notifier>,
    config: MonitorConfig,
}

impl UptimeMonitor {
    /// Create a new monitor
    pub fn new(prober: Arc<dyn Probe>, notifier: Arc<dyn Notifier>, config: MonitorConfig) -> Self {
        Self {
            prober,
            notifier,
            config,
        }
    }

    /// Monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Start the monitor. Never returns; the process is expected to be stopped externally.
    pub async fn start(&self) {
        info!(
            "Starting uptime monitor for {} ({}), confirming changes over {} polls every {:?}",
            self.config.target_label,
            self.config.device_name,
            self.config.confirm_time,
            self.config.confirm_delay
        );

        let mut confirmed = self.initial_state().await;

        loop {
            confirmed = self.poll(confirmed).await.state();
            sleep(self.config.confirm_delay).await;
        }
    }

    /// Take the first reading. It becomes the confirmed state without confirmation.
    pub async fn initial_state(&self) -> DeviceState {
        let state = DeviceState::from(self.prober.probe().await);
        info!("{} is initially {}", self.config.target_label, state);
        state
    }

    /// One pass of the loop, without the trailing delay.
    ///
    /// When the reading disagrees with `confirmed`, the monitor re-probes up to
    /// `confirm_time` times, `confirm_delay` apart. A single re-probe that agrees
    /// with `confirmed` ends the attempt; only a full window of disagreeing
    /// readings commits the transition and sends the alert.
    pub async fn poll(&self, confirmed: DeviceState) -> PollOutcome {
        let observed = self.observe().await;
        if observed == confirmed {
            return PollOutcome::Steady(confirmed);
        }

        info!(
            "{} looks {}, confirming over {} polls",
            self.config.target_label, observed, self.config.confirm_time
        );

        let mut agreeing = 0;
        while agreeing < self.config.confirm_time {
            sleep(self.config.confirm_delay).await;
            if self.observe().await == confirmed {
                info!(
                    "{} is {} again after {} of {} polls, ignoring the change",
                    self.config.target_label, confirmed, agreeing, self.config.confirm_time
                );
                return PollOutcome::FlapAbsorbed(confirmed);
            }
            agreeing += 1;
        }

        let transition = Transition {
            from: confirmed,
            to: observed,
        };
        self.commit(transition).await;
        PollOutcome::Transitioned(transition)
    }

    async fn observe(&self) -> DeviceState {
        let up = self.prober.probe().await;
        info!(
            "{} probe: {}",
            self.config.target_label,
            if up { "UP" } else { "DOWN" }
        );
        DeviceState::from(up)
    }

    /// Announce a confirmed transition. Delivery failures are logged and otherwise ignored.
    async fn commit(&self, transition: Transition) {
        info!("Device {}", transition.to);

        let message =
            transition.alert_message(&self.config.target_label, &self.config.device_name);
        match self.notifier.notify(&message).await {
            Ok(()) => info!(
                "Sent {} alert for {}",
                transition.to, self.config.target_label
            ),
            Err(e) => error!(
                "Failed to send {} alert for {}: {}",
                transition.to, self.config.target_label, e
            ),
        }
    }
}
