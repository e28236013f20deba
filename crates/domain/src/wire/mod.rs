//! RFC 1035 §4 wire format: bounds-checked reading, name compression on
//! both paths, per-type RDATA dispatch.

mod decode;
mod encode;
mod reader;
mod writer;

pub use decode::decode_message;
pub use encode::encode_message;

/// Largest message the UDP transport may carry (RFC 1035 §2.3.4).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
