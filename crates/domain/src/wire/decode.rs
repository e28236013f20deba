use super::reader::{Phase, WireReader};
use crate::errors::DnsError;
use crate::header::Header;
use crate::message::{Message, MessageRole};
use crate::rdata::{HinfoData, MinfoData, MxData, RData, SoaData, WksData};
use crate::record::{Question, ResourceRecord};
use crate::record_type::{RecordClass, RecordType};

/// Decodes a message in the given role. Query-role decoding stops after
/// the question section (the header validation has already pinned every
/// record count to zero); response-role decoding reads all three record
/// sections.
pub fn decode_message(data: &[u8], role: MessageRole) -> Result<Message, DnsError> {
    let mut reader = WireReader::new(data);
    let header = decode_header(&mut reader, role)?;
    let questions = decode_questions(&mut reader, header.qd_count)?;
    if role == MessageRole::Query {
        return Ok(Message {
            header,
            questions,
            ..Default::default()
        });
    }
    let answers = decode_records(&mut reader, header.an_count)?;
    let authorities = decode_records(&mut reader, header.ns_count)?;
    let additionals = decode_records(&mut reader, header.ar_count)?;
    Ok(Message {
        header,
        questions,
        answers,
        authorities,
        additionals,
    })
}

fn decode_header(reader: &mut WireReader, role: MessageRole) -> Result<Header, DnsError> {
    debug_assert_eq!(reader.phase(), Phase::Header);
    let id = reader.read_u16("header ID")?;
    let flags = reader.read_u16("header flags")?;
    let qd_count = reader.read_u16("QDCOUNT")?;
    let an_count = reader.read_u16("ANCOUNT")?;
    let ns_count = reader.read_u16("NSCOUNT")?;
    let ar_count = reader.read_u16("ARCOUNT")?;
    let header = Header::from_wire(id, flags, qd_count, an_count, ns_count, ar_count);
    validate_header(&header, role)?;
    reader.set_phase(Phase::Questions);
    Ok(header)
}

fn validate_header(header: &Header, role: MessageRole) -> Result<(), DnsError> {
    let fail = |role: &'static str, reason: &'static str| -> Result<(), DnsError> {
        Err(DnsError::InvalidHeader { role, reason })
    };
    match role {
        MessageRole::Query => {
            if header.qr() {
                return fail("query", "QR bit set");
            }
            if header.aa() {
                return fail("query", "AA bit set");
            }
            if header.ra() {
                return fail("query", "RA bit set");
            }
            if header.z() != 0 {
                return fail("query", "Z bits set");
            }
            if header.rcode() != 0 {
                return fail("query", "RCODE set");
            }
            if header.qd_count == 0 {
                return fail("query", "QDCOUNT is zero");
            }
            if header.an_count != 0 {
                return fail("query", "ANCOUNT set");
            }
            if header.ns_count != 0 {
                return fail("query", "NSCOUNT set");
            }
            if header.ar_count != 0 {
                return fail("query", "ARCOUNT set");
            }
        }
        MessageRole::Response => {
            if !header.qr() {
                return fail("response", "QR bit not set");
            }
            if header.qd_count == 0 {
                return fail("response", "QDCOUNT is zero");
            }
        }
    }
    Ok(())
}

fn decode_questions(reader: &mut WireReader, count: u16) -> Result<Vec<Question>, DnsError> {
    debug_assert_eq!(reader.phase(), Phase::Questions);
    let mut questions = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let qname = reader.read_name()?;
        let qtype = RecordType::from_u16(reader.read_u16("QTYPE")?)?;
        let qclass = RecordClass::from_u16(reader.read_u16("QCLASS")?)?;
        questions.push(Question {
            qname,
            qtype,
            qclass,
        });
    }
    reader.set_phase(Phase::Records);
    Ok(questions)
}

fn decode_records(reader: &mut WireReader, count: u16) -> Result<Vec<ResourceRecord>, DnsError> {
    debug_assert_eq!(reader.phase(), Phase::Records);
    let mut records = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let name = reader.read_name()?;
        let record_type = RecordType::from_u16(reader.read_u16("TYPE")?)?;
        let class = RecordClass::from_u16(reader.read_u16("CLASS")?)?;
        let ttl = reader.read_u32("TTL")?;
        let rd_length = reader.read_u16("RDLENGTH")?;
        let rdata = decode_rdata(reader, record_type, rd_length)?;
        records.push(ResourceRecord {
            name,
            class,
            ttl,
            rdata,
        });
    }
    Ok(records)
}

/// Dispatches on TYPE and checks that the decoder consumed exactly
/// RDLENGTH octets afterwards; compressed names inside RDATA make the
/// consumed length differ from the field's own encoding otherwise.
fn decode_rdata(
    reader: &mut WireReader,
    record_type: RecordType,
    rd_length: u16,
) -> Result<RData, DnsError> {
    let start = reader.position();
    let rdata = match record_type {
        RecordType::A => RData::A(reader.read_ipv4()?),
        RecordType::AAAA => RData::AAAA(reader.read_ipv6()?),
        RecordType::NS => RData::NS(reader.read_name()?),
        RecordType::MD => RData::MD(reader.read_name()?),
        RecordType::MF => RData::MF(reader.read_name()?),
        RecordType::CNAME => RData::CNAME(reader.read_name()?),
        RecordType::MB => RData::MB(reader.read_name()?),
        RecordType::MG => RData::MG(reader.read_name()?),
        RecordType::MR => RData::MR(reader.read_name()?),
        RecordType::PTR => RData::PTR(reader.read_name()?),
        RecordType::SOA => RData::SOA(SoaData {
            mname: reader.read_name()?,
            rname: reader.read_name()?,
            serial: reader.read_u32("SOA serial")?,
            refresh: reader.read_u32("SOA refresh")?,
            retry: reader.read_u32("SOA retry")?,
            expire: reader.read_u32("SOA expire")?,
            minimum: reader.read_u32("SOA minimum")?,
        }),
        RecordType::MINFO => RData::MINFO(MinfoData {
            rmailbx: reader.read_name()?,
            emailbx: reader.read_name()?,
        }),
        RecordType::HINFO => RData::HINFO(HinfoData {
            cpu: reader.read_char_string()?,
            os: reader.read_char_string()?,
        }),
        RecordType::MX => RData::MX(MxData {
            preference: reader.read_u16("MX preference")?,
            exchange: reader.read_name()?,
        }),
        RecordType::TXT => {
            let end = start + usize::from(rd_length);
            let mut data = Vec::new();
            while reader.position() < end {
                data.push(reader.read_char_string()?);
            }
            RData::TXT(data)
        }
        RecordType::NULL => RData::NULL(reader.read_bytes(usize::from(rd_length), "NULL RDATA")?.to_vec()),
        RecordType::WKS => {
            let bitmap_len = usize::from(rd_length).checked_sub(5).ok_or(
                DnsError::RdLengthMismatch {
                    declared: rd_length,
                    consumed: 5,
                },
            )?;
            RData::WKS(WksData {
                address: reader.read_ipv4()?,
                protocol: reader.read_u8("WKS protocol")?,
                bitmap: reader.read_bytes(bitmap_len, "WKS bitmap")?.to_vec(),
            })
        }
        RecordType::AXFR | RecordType::MAILB | RecordType::MAILA | RecordType::ANY => {
            return Err(DnsError::UnsupportedType(record_type.to_u16()))
        }
    };
    let consumed = reader.position() - start;
    if consumed != usize::from(rd_length) {
        return Err(DnsError::RdLengthMismatch {
            declared: rd_length,
            consumed: consumed as u16,
        });
    }
    Ok(rdata)
}
