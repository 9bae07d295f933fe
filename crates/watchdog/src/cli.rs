use clap::Parser;
use http_probe::{ProbeError, Target};

/// Fallback device name when neither `--name` nor `DEFAULT_DEVICE_NAME` is set.
const FALLBACK_DEVICE_NAME: &str = "device";

/// Command-line flags of the watchdog.
#[derive(Debug, Parser)]
#[command(
    name = "watchdog",
    about = "Probe an HTTP endpoint and send an SMS when it goes offline or comes back",
    version
)]
pub struct Args {
    /// Address of the host to check
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Port of the host to check
    #[arg(short, long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Resource to request, e.g. /
    #[arg(short, long, default_value = "/")]
    pub resource: String,

    /// Connection timeout in seconds; values below 1 are raised to 1
    #[arg(
        short = 't',
        long = "time-out",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// Consecutive polls a change must hold for before it is announced
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub confirm_time: u32,

    /// Seconds between polls
    #[arg(short = 'd', long, default_value_t = 6)]
    pub confirm_delay: u64,

    /// Device name shown in alerts [default: $DEFAULT_DEVICE_NAME]
    #[arg(short, long)]
    pub name: Option<String>,
}

impl Args {
    /// The endpoint described by the flags.
    pub fn target(&self) -> Result<Target, ProbeError> {
        Target::new(
            self.address.as_str(),
            self.port,
            &self.resource,
            self.timeout,
        )
    }

    /// `--name`, else `DEFAULT_DEVICE_NAME` from `lookup`, else a generic label.
    pub fn device_name<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        self.name
            .clone()
            .or_else(|| lookup("DEFAULT_DEVICE_NAME"))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_DEVICE_NAME.to_string())
    }
}
