use super::resolver::RecursiveResolver;
use burrow_dns_domain::wire::{decode_message, encode_message, MAX_UDP_MESSAGE_SIZE};
use burrow_dns_domain::{DnsError, Message, MessageRole};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

/// UDP listener loop: each datagram is decoded as a client query,
/// resolved on its own task, and answered at the sender's address. No
/// state survives a datagram.
pub async fn run_udp_server(
    bind_addr: SocketAddr,
    resolver: Arc<RecursiveResolver>,
) -> std::io::Result<()> {
    let socket = Arc::new(create_udp_socket(bind_addr)?);
    info!(bind = %bind_addr, "listening for DNS queries");

    let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];
    loop {
        let (received, client_addr) = match socket.recv_from(&mut recv_buf).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let datagram = recv_buf[..received].to_vec();
        let resolver = Arc::clone(&resolver);
        let socket = Arc::clone(&socket);
        tokio::spawn(async move {
            if let Some(reply) = handle_datagram(&datagram, &resolver, client_addr).await {
                if let Err(e) = socket.send_to(&reply, client_addr).await {
                    error!(client = %client_addr, error = %e, "failed to send reply");
                }
            }
        });
    }
}

async fn handle_datagram(
    datagram: &[u8],
    resolver: &RecursiveResolver,
    client_addr: SocketAddr,
) -> Option<Vec<u8>> {
    match process_query(datagram, resolver).await {
        Ok(reply) => Some(reply),
        Err(error) => {
            warn!(client = %client_addr, %error, "query failed");
            error_reply(datagram, &error)
        }
    }
}

async fn process_query(
    datagram: &[u8],
    resolver: &RecursiveResolver,
) -> Result<Vec<u8>, DnsError> {
    let query = decode_message(datagram, MessageRole::Query)?;
    let question = &query.questions[0];
    info!(
        domain = %question.qname,
        qtype = %question.qtype,
        "query received"
    );
    let answer = resolver.resolve_query(&query).await?;
    encode_message(&answer)
}

/// Error reply bearing the client's ID. The ID sits in the first two
/// octets regardless of how far decoding got; anything shorter has no ID
/// to echo and is dropped.
fn error_reply(datagram: &[u8], error: &DnsError) -> Option<Vec<u8>> {
    if datagram.len() < 2 {
        return None;
    }
    let id = u16::from_be_bytes([datagram[0], datagram[1]]);
    let reply = Message::error_response(id, error.rcode());
    encode_message(&reply).ok()
}

fn create_udp_socket(bind_addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(4 * 1024 * 1024)?;
    socket.set_send_buffer_size(2 * 1024 * 1024)?;
    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow_dns_domain::Rcode;

    #[test]
    fn error_reply_echoes_the_wire_id() {
        let datagram = [0xAB, 0xCD, 0xFF];
        let reply = error_reply(&datagram, &DnsError::OutOfBounds("header")).unwrap();
        assert_eq!(&reply[..2], &[0xAB, 0xCD]);
        // QR + RA set, RCODE = FORMERR, all counts zero.
        assert_eq!(u16::from_be_bytes([reply[2], reply[3]]), 0x8081);
        assert_eq!(reply.len(), 12);
        assert_eq!(
            reply[3] & 0x0F,
            Rcode::FormErr.value()
        );
    }

    #[test]
    fn datagram_too_short_for_an_id_is_dropped() {
        assert!(error_reply(&[0xAB], &DnsError::OutOfBounds("header")).is_none());
    }
}
