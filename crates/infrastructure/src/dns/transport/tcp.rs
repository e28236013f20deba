//! TCP transport for upstream queries (RFC 1035 §4.2.2): both directions
//! carry a two-octet big-endian length prefix ahead of the message.

use super::DnsTransport;
use async_trait::async_trait;
use burrow_dns_domain::DnsError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65_535;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn timeout_error(&self) -> DnsError {
        DnsError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    fn io_error(&self, reason: String) -> DnsError {
        DnsError::TransportIo {
            server: self.server_addr.to_string(),
            reason,
        }
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn exchange(&self, message: &[u8], timeout: Duration) -> Result<Vec<u8>, DnsError> {
        let mut stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(format!("connection failed: {e}")))?;

        let length = (message.len() as u16).to_be_bytes();
        tokio::time::timeout(timeout, async {
            stream.write_all(&length).await?;
            stream.write_all(message).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| self.io_error(format!("failed to send TCP query: {e}")))?;

        debug!(server = %self.server_addr, len = message.len(), "TCP query sent");

        let response = tokio::time::timeout(timeout, async {
            let mut len_buf = [0u8; 2];
            stream
                .read_exact(&mut len_buf)
                .await
                .map_err(|e| self.io_error(format!("failed to read response length: {e}")))?;
            let response_len = usize::from(u16::from_be_bytes(len_buf));
            if response_len > MAX_TCP_MESSAGE_SIZE {
                return Err(self.io_error(format!("response too large: {response_len} octets")));
            }
            let mut response = vec![0u8; response_len];
            stream
                .read_exact(&mut response)
                .await
                .map_err(|e| self.io_error(format!("failed to read response body: {e}")))?;
            Ok(response)
        })
        .await
        .map_err(|_| self.timeout_error())??;

        debug!(server = %self.server_addr, len = response.len(), "TCP response received");
        Ok(response)
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
