use crate::header::{Header, Rcode};
use crate::record::{Question, ResourceRecord};
use crate::record_type::{RecordClass, RecordType};

/// Which side of the protocol a message is decoded as. Header validation
/// is gated on the role (§4.1.1 semantics differ for queries and replies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    Query,
    Response,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Message {
    /// A single-question query. All flag bits stay zero; the recursion
    /// engine walks delegations itself and does not ask upstreams for
    /// recursion.
    pub fn query(id: u16, qname: &str, qtype: RecordType, qclass: RecordClass) -> Self {
        let mut header = Header::default();
        header.id = id;
        header.qd_count = 1;
        Self {
            header,
            questions: vec![Question {
                qname: qname.to_string(),
                qtype,
                qclass,
            }],
            ..Default::default()
        }
    }

    /// Reply to `request` carrying `answers`. The request ID and question
    /// section are copied verbatim; QR and RA are set, AA and RD stay
    /// clear; the authority and additional sections stay empty.
    pub fn answer_for(request: &Message, answers: Vec<ResourceRecord>) -> Self {
        let mut header = Header::default();
        header.id = request.header.id;
        header.set_qr(true);
        header.set_ra(true);
        header.qd_count = request.questions.len() as u16;
        header.an_count = answers.len() as u16;
        Self {
            header,
            questions: request.questions.clone(),
            answers,
            ..Default::default()
        }
    }

    /// Bare error reply: header only, echoing `id` with the given code.
    pub fn error_response(id: u16, rcode: Rcode) -> Self {
        let mut header = Header::default();
        header.id = id;
        header.set_qr(true);
        header.set_ra(true);
        header.set_rcode(rcode);
        Self {
            header,
            ..Default::default()
        }
    }
}
