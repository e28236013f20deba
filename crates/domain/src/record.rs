use crate::rdata::RData;
use crate::record_type::{RecordClass, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    pub qtype: RecordType,
    pub qclass: RecordClass,
}

/// A resource record. The TYPE field is derived from the RDATA variant;
/// RDLENGTH exists only on the wire and is recomputed on encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn record_type(&self) -> RecordType {
        self.rdata.record_type()
    }
}
