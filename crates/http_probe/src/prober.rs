use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::{ProbeError, StatusLine, Target};

/// Maximum number of response bytes read per probe.
pub const RESPONSE_BUDGET: usize = 100;

/// Checks a [`Target`] over a fresh TCP connection per call.
///
/// The connection lives only for the duration of one probe and is closed on
/// every exit path. There are no retries; a failed probe simply reports DOWN.
#[derive(Debug, Clone)]
pub struct HttpProber {
    target: Target,
}

impl HttpProber {
    /// Create a prober for the given target
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    /// The target being probed
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Send the request and parse the status line of the response.
    pub async fn check(&self) -> Result<StatusLine, ProbeError> {
        let limit = self.target.timeout();
        let request = self.target.request();

        let mut stream = match timeout(
            limit,
            TcpStream::connect((self.target.address(), self.target.port())),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(ProbeError::Connect(e)),
            Err(_) => return Err(ProbeError::Timeout(limit)),
        };

        timeout(limit, stream.write_all(request.as_bytes()))
            .await
            .map_err(|_| ProbeError::Timeout(limit))??;

        let mut buf = [0u8; RESPONSE_BUDGET];
        let read = timeout(limit, stream.read(&mut buf))
            .await
            .map_err(|_| ProbeError::Timeout(limit))??;
        drop(stream);

        StatusLine::parse(&buf[..read])
    }

    /// Probe the target, returning `true` when it is up.
    ///
    /// Connection problems are logged at debug level, unparsable responses
    /// at warn level. Neither is surfaced to the caller beyond a DOWN result.
    pub async fn probe(&self) -> bool {
        match self.check().await {
            Ok(line) => {
                let up = line.is_up();
                debug!(
                    "{} answered {} {} {}",
                    self.target, line.version, line.status, line.reason
                );
                up
            }
            Err(e) if e.is_parse_error() => {
                warn!("Failed to split status line from {}: {}", self.target, e);
                false
            }
            Err(e) => {
                debug!(
                    "Connection to {} on port {} failed: {}",
                    self.target.address(),
                    self.target.port(),
                    e
                );
                false
            }
        }
    }
}
