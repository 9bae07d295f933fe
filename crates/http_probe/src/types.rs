use std::{fmt, sync::LazyLock, time::Duration};

use regex::Regex;

/// Status codes that count as the endpoint being up.
pub const UP_STATUS_CODES: [&str; 3] = ["200", "301", "302"];

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)(?:\s+(.*))?$").expect("status line pattern is valid")
});

/// Errors produced while probing a target.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The target description cannot be probed.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// The TCP connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(#[source] std::io::Error),

    /// Connecting, sending or reading took longer than the probe timeout.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The connection broke while sending the request or reading the response.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first response line could not be split into version and status.
    #[error("Malformed status line: {0:?}")]
    MalformedStatusLine(String),
}

impl ProbeError {
    /// Whether the endpoint answered with something that is not an HTTP status line.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ProbeError::MalformedStatusLine(_))
    }
}

/// The endpoint a prober checks. Built once from configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    address: String,
    port: u16,
    resource: String,
    timeout: Duration,
}

impl Target {
    /// Builds a target, prefixing `resource` with `/` when needed and coercing
    /// timeouts below one second up to one second.
    pub fn new(
        address: impl Into<String>,
        port: u16,
        resource: &str,
        timeout_secs: i64,
    ) -> Result<Self, ProbeError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ProbeError::InvalidTarget("address is empty".to_string()));
        }
        if port == 0 {
            return Err(ProbeError::InvalidTarget(
                "port must be between 1 and 65535".to_string(),
            ));
        }

        let resource = if resource.starts_with('/') {
            resource.to_string()
        } else {
            format!("/{}", resource)
        };

        Ok(Self {
            address,
            port,
            resource,
            timeout: Duration::from_secs(timeout_secs.max(1) as u64),
        })
    }

    /// Host name or IP address of the target.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// TCP port of the target.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Requested path, always starting with `/`.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Bound applied to each socket operation of a probe.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The minimal request sent on every probe.
    pub fn request(&self) -> String {
        format!(
            "GET {} HTTP/1.1\r\nHost:{}\r\n\r\n",
            self.resource, self.address
        )
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// The first line of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Protocol version, e.g. `HTTP/1.1`.
    pub version: String,
    /// Status code as sent by the server.
    pub status: String,
    /// Reason phrase, empty when the server omitted it.
    pub reason: String,
}

impl StatusLine {
    /// Parses the first line out of a (possibly truncated) response.
    pub fn parse(response: &[u8]) -> Result<Self, ProbeError> {
        let line = match response.iter().position(|&b| b == b'\n') {
            Some(end) => &response[..=end],
            None => response,
        };
        let line = std::str::from_utf8(line).map_err(|_| {
            ProbeError::MalformedStatusLine(String::from_utf8_lossy(line).into_owned())
        })?;
        let line = line.trim_end_matches(['\r', '\n']);

        let captures = STATUS_LINE
            .captures(line)
            .ok_or_else(|| ProbeError::MalformedStatusLine(line.to_string()))?;

        Ok(Self {
            version: captures[1].to_string(),
            status: captures[2].to_string(),
            reason: captures
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Whether the status code means the endpoint is up.
    pub fn is_up(&self) -> bool {
        UP_STATUS_CODES.contains(&self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_prefixes_resource() {
        let target = Target::new("example.com", 80, "health", 1).unwrap();
        assert_eq!(target.resource(), "/health");

        let target = Target::new("example.com", 80, "/health", 1).unwrap();
        assert_eq!(target.resource(), "/health");
    }

    #[test]
    fn test_target_coerces_timeout() {
        let target = Target::new("example.com", 80, "/", 0).unwrap();
        assert_eq!(target.timeout(), Duration::from_secs(1));

        let target = Target::new("example.com", 80, "/", -5).unwrap();
        assert_eq!(target.timeout(), Duration::from_secs(1));

        let target = Target::new("example.com", 80, "/", 7).unwrap();
        assert_eq!(target.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_target_rejects_port_zero_and_empty_address() {
        assert!(matches!(
            Target::new("example.com", 0, "/", 1),
            Err(ProbeError::InvalidTarget(_))
        ));
        assert!(matches!(
            Target::new("  ", 80, "/", 1),
            Err(ProbeError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_target_request_and_display() {
        let target = Target::new("example.com", 8080, "status", 1).unwrap();
        assert_eq!(
            target.request(),
            "GET /status HTTP/1.1\r\nHost:example.com\r\n\r\n"
        );
        assert_eq!(target.to_string(), "example.com:8080");
    }

    #[test]
    fn test_parse_full_status_line() {
        let line = StatusLine::parse(b"HTTP/1.1 301 Moved Permanently\r\nLocation: /x\r\n").unwrap();
        assert_eq!(line.version, "HTTP/1.1");
        assert_eq!(line.status, "301");
        assert_eq!(line.reason, "Moved Permanently");
        assert!(line.is_up());
    }

    #[test]
    fn test_parse_without_reason_phrase() {
        let line = StatusLine::parse(b"HTTP/1.1 200\r\n").unwrap();
        assert_eq!(line.status, "200");
        assert_eq!(line.reason, "");
        assert!(line.is_up());
    }

    #[test]
    fn test_classification() {
        for code in ["200", "301", "302"] {
            let raw = format!("HTTP/1.1 {} Whatever\r\n", code);
            assert!(StatusLine::parse(raw.as_bytes()).unwrap().is_up(), "{}", code);
        }
        for code in ["204", "304", "404", "500", "503"] {
            let raw = format!("HTTP/1.1 {} Whatever\r\n", code);
            assert!(!StatusLine::parse(raw.as_bytes()).unwrap().is_up(), "{}", code);
        }
    }

    #[test]
    fn test_parse_failures() {
        let cases: [&[u8]; 5] = [b"", b"\r\n", b"garbage", b"HTTP/1.1\r\n", b"\xff\xfe 200 OK\r\n"];
        for raw in cases {
            let err = StatusLine::parse(raw).unwrap_err();
            assert!(err.is_parse_error(), "{:?} should fail to parse", raw);
        }
    }

    #[test]
    fn test_parse_truncated_response() {
        // Only the first line matters, even when the read budget cut it short.
        let line = StatusLine::parse(b"HTTP/1.0 503 Service Unav").unwrap();
        assert_eq!(line.status, "503");
        assert!(!line.is_up());
    }
}
