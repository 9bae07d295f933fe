//! Main entry point for the watchdog.
//! Probes a single HTTP endpoint forever and texts a phone number when it goes offline or comes back.

mod cli;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use http_probe::HttpProber;
use notification_services::{
    LuosimaoSmsService, MockSmsService, Notifier, SmsConfig, SmsNotifier, SmsService,
};
use uptime_monitor::{MonitorConfig, UptimeMonitor};

use crate::cli::Args;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - [{}]: {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn create_notifier() -> Arc<dyn Notifier> {
    let config = match SmsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("🔧 {}, alerts will only be logged", e);
            return mock_notifier();
        }
    };

    match LuosimaoSmsService::new(&config) {
        Ok(service) => {
            log::info!("📱 SMS alerts go to {} via {}", config.phone_number, config.api_url);
            let sms_service: Arc<dyn SmsService> = Arc::new(service);
            Arc::new(SmsNotifier::new(sms_service, config.phone_number))
        }
        Err(e) => {
            log::error!("❌ Failed to initialize SMS service: {}", e);
            mock_notifier()
        }
    }
}

fn mock_notifier() -> Arc<dyn Notifier> {
    let sms_service: Arc<dyn SmsService> = Arc::new(MockSmsService::default());
    Arc::new(SmsNotifier::new(sms_service, "unconfigured"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    init_logger();

    let args = Args::parse();
    let target = args.target().context("Invalid probe target")?;
    let device_name = args.device_name(|key| std::env::var(key).ok());

    log::info!(
        "🚀 Starting watchdog for {}{} ({})",
        target,
        target.resource(),
        device_name
    );

    let config = MonitorConfig {
        confirm_time: args.confirm_time,
        confirm_delay: Duration::from_secs(args.confirm_delay),
        ..MonitorConfig::for_target(&target, device_name)
    };
    let monitor = UptimeMonitor::new(
        Arc::new(HttpProber::new(target)),
        create_notifier(),
        config,
    );

    tokio::select! {
        _ = monitor.start() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            log::info!("🛑 Received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
