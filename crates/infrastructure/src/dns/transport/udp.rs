//! UDP transport for upstream queries (RFC 1035 §4.2.1).
//!
//! Messages travel unframed and responses are capped at 512 octets; a
//! response with the TC bit set tells the caller to retry over TCP.

use super::DnsTransport;
use async_trait::async_trait;
use burrow_dns_domain::wire::MAX_UDP_MESSAGE_SIZE;
use burrow_dns_domain::DnsError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
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
impl DnsTransport for UdpTransport {
    async fn exchange(&self, message: &[u8], timeout: Duration) -> Result<Vec<u8>, DnsError> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| self.io_error(format!("failed to bind UDP socket: {e}")))?;

        tokio::time::timeout(timeout, socket.send_to(message, self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(format!("failed to send UDP query: {e}")))?;

        debug!(server = %self.server_addr, len = message.len(), "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];
        let (received, from_addr) = tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.io_error(format!("failed to receive UDP response: {e}")))?;

        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(received);
        debug!(server = %self.server_addr, len = received, "UDP response received");
        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_reports_its_protocol() {
        let addr: SocketAddr = "198.41.0.4:53".parse().unwrap();
        let transport = UdpTransport::new(addr);
        assert_eq!(transport.server_addr, addr);
        assert_eq!(transport.protocol_name(), "UDP");
    }
}
