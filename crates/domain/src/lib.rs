pub mod errors;
pub mod header;
pub mod message;
pub mod rdata;
pub mod record;
pub mod record_type;
pub mod wire;

pub use errors::DnsError;
pub use header::{Header, Rcode};
pub use message::{Message, MessageRole};
pub use rdata::{HinfoData, MinfoData, MxData, RData, SoaData, WksData};
pub use record::{Question, ResourceRecord};
pub use record_type::{RecordClass, RecordType};
