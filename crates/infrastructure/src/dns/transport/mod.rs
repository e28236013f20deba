pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use burrow_dns_domain::DnsError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub use tcp::TcpTransport;
pub use udp::UdpTransport;

pub const DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Udp => "UDP",
            Protocol::Tcp => "TCP",
        }
    }
}

/// One send-and-receive against a nameserver. A single attempt: errors and
/// timeouts surface to the caller, which decides whether the resolution
/// dies with them.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(&self, message: &[u8], timeout: Duration) -> Result<Vec<u8>, DnsError>;

    fn protocol_name(&self) -> &'static str;
}

/// The recursion engine's view of the network: exchange a query with a
/// specific nameserver over the given protocol. Tests substitute a
/// scripted implementation.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        query: &[u8],
        server: Ipv4Addr,
        protocol: Protocol,
    ) -> Result<Vec<u8>, DnsError>;
}

/// Production exchange: a fresh UDP socket or TCP connection per attempt,
/// port 53, shared timeout.
pub struct NetExchange {
    timeout: Duration,
}

impl NetExchange {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl UpstreamExchange for NetExchange {
    async fn exchange(
        &self,
        query: &[u8],
        server: Ipv4Addr,
        protocol: Protocol,
    ) -> Result<Vec<u8>, DnsError> {
        let addr = SocketAddr::from((server, DNS_PORT));
        match protocol {
            Protocol::Udp => UdpTransport::new(addr).exchange(query, self.timeout).await,
            Protocol::Tcp => TcpTransport::new(addr).exchange(query, self.timeout).await,
        }
    }
}
