use super::protocol::{decode_response, encode_request, read_response_line, write_request};
use async_trait::async_trait;
use dnsguard_application::ports::ClassificationPort;
use dnsguard_domain::{DaemonConfig, DomainError, Verdict};
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Short-lived TCP client for the classification daemon.
///
/// Every lookup opens a fresh connection, performs one request/response
/// exchange and closes it. There is no pooling, pipelining or retry.
pub struct DaemonClient {
    server: String,
    connect_timeout: Duration,
    read_timeout: Duration,
    max_response_bytes: usize,
}

impl DaemonClient {
    pub fn new(config: &DaemonConfig) -> Self {
        Self {
            server: config.endpoint(),
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            max_response_bytes: config.max_response_bytes,
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout = connect;
        self.read_timeout = read;
        self
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    async fn connect(&self) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&self.server))
            .await
            .map_err(|_| DomainError::DaemonConnectTimeout {
                server: self.server.clone(),
            })?
            .map_err(|e| DomainError::DaemonUnreachable {
                server: self.server.clone(),
                reason: e.to_string(),
            })?;

        stream
            .set_nodelay(true)
            .map_err(|e| DomainError::IoError(format!("Failed to set TCP_NODELAY: {}", e)))?;

        Ok(stream)
    }

    /// Performs one exchange, reporting why it failed.
    pub async fn classify(&self, query_name: &str) -> Result<Verdict, DomainError> {
        let mut stream = self.connect().await?;
        let request = encode_request(query_name);

        debug!(server = %self.server, name = %query_name, "Daemon request sent");

        let line = tokio::time::timeout(self.read_timeout, async {
            write_request(&mut stream, &request).await?;
            read_response_line(&mut stream, self.max_response_bytes, &self.server).await
        })
        .await
        .map_err(|_| DomainError::DaemonReadTimeout {
            server: self.server.clone(),
        })??;

        debug!(
            server = %self.server,
            response_len = line.len(),
            "Daemon response received"
        );

        decode_response(&line)
    }
}

#[async_trait]
impl ClassificationPort for DaemonClient {
    async fn lookup(&self, query_name: &str) -> Option<Verdict> {
        match self.classify(query_name).await {
            Ok(verdict) => Some(verdict),
            Err(e) => {
                warn!(error = %e, name = %query_name, "Classification unavailable");
                None
            }
        }
    }
}
