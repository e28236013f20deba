use std::net::Ipv4Addr;

/// IPv4 root nameserver hints, compiled in. Losing one root only costs a
/// retry from the client, so the list does not need to be live-updated.
pub const ROOT_SERVERS: [Ipv4Addr; 9] = [
    Ipv4Addr::new(170, 247, 170, 2),
    Ipv4Addr::new(192, 33, 4, 12),
    Ipv4Addr::new(199, 7, 91, 13),
    Ipv4Addr::new(192, 203, 230, 10),
    Ipv4Addr::new(192, 5, 5, 251),
    Ipv4Addr::new(198, 97, 190, 53),
    Ipv4Addr::new(192, 36, 148, 17),
    Ipv4Addr::new(193, 0, 14, 129),
    Ipv4Addr::new(202, 12, 27, 33),
];

/// Uniformly random root for a fresh top-level resolution.
pub fn pick_root(roots: &[Ipv4Addr]) -> Ipv4Addr {
    roots[fastrand::usize(..roots.len())]
}
