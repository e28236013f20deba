use crate::header::Rcode;
use thiserror::Error;

/// Every failure the resolver can produce, from wire decoding up to
/// upstream exchanges. [`DnsError::rcode`] gives the response code a
/// client-facing reply carries for the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("out of bounds while reading {0}")]
    OutOfBounds(&'static str),

    #[error("malformed name: {0}")]
    MalformedName(&'static str),

    #[error("cyclic name compression pointer chain")]
    CyclicName,

    #[error("invalid {role} header: {reason}")]
    InvalidHeader {
        role: &'static str,
        reason: &'static str,
    },

    #[error("RDATA length mismatch: declared {declared}, consumed {consumed}")]
    RdLengthMismatch { declared: u16, consumed: u16 },

    #[error("unsupported record type {0}")]
    UnsupportedType(u16),

    #[error("unknown record class {0}")]
    UnknownClass(u16),

    #[error("invalid domain name: {0}")]
    InvalidName(String),

    #[error("invalid record data: {0}")]
    InvalidRecordData(&'static str),

    #[error("transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("transport error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("no authority could be resolved for the referral")]
    NoAuthority,

    #[error("upstream truncated the response over TCP")]
    TruncatedTcpResponse,

    #[error("domain does not exist")]
    NxDomain,

    #[error("query refused")]
    Refused,
}

impl DnsError {
    /// Response code for a client-facing error reply.
    pub fn rcode(&self) -> Rcode {
        match self {
            DnsError::OutOfBounds(_)
            | DnsError::MalformedName(_)
            | DnsError::CyclicName
            | DnsError::InvalidHeader { .. }
            | DnsError::RdLengthMismatch { .. }
            | DnsError::UnknownClass(_)
            | DnsError::InvalidName(_)
            | DnsError::InvalidRecordData(_) => Rcode::FormErr,
            DnsError::TransportTimeout { .. }
            | DnsError::TransportIo { .. }
            | DnsError::NoAuthority
            | DnsError::TruncatedTcpResponse => Rcode::ServFail,
            DnsError::NxDomain => Rcode::NxDomain,
            DnsError::UnsupportedType(_) => Rcode::NotImp,
            DnsError::Refused => Rcode::Refused,
        }
    }
}
