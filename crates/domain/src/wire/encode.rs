use super::writer::WireWriter;
use crate::errors::DnsError;
use crate::header::Header;
use crate::message::Message;
use crate::rdata::RData;
use crate::record::{Question, ResourceRecord};

/// Encodes a message: header, then every section in declared order. One
/// compression table spans the whole message, so any name may point at
/// any earlier suffix.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, DnsError> {
    let mut writer = WireWriter::new();
    encode_header(&mut writer, &message.header);
    for question in &message.questions {
        encode_question(&mut writer, question)?;
    }
    encode_records(&mut writer, &message.answers)?;
    encode_records(&mut writer, &message.authorities)?;
    encode_records(&mut writer, &message.additionals)?;
    Ok(writer.into_bytes())
}

fn encode_header(writer: &mut WireWriter, header: &Header) {
    writer.write_u16(header.id);
    writer.write_u16(header.raw_flags());
    writer.write_u16(header.qd_count);
    writer.write_u16(header.an_count);
    writer.write_u16(header.ns_count);
    writer.write_u16(header.ar_count);
}

fn encode_question(writer: &mut WireWriter, question: &Question) -> Result<(), DnsError> {
    writer.write_name(&question.qname)?;
    writer.write_u16(question.qtype.to_u16());
    writer.write_u16(question.qclass.to_u16());
    Ok(())
}

fn encode_records(writer: &mut WireWriter, records: &[ResourceRecord]) -> Result<(), DnsError> {
    for record in records {
        writer.write_name(&record.name)?;
        writer.write_u16(record.record_type().to_u16());
        writer.write_u16(record.class.to_u16());
        writer.write_u32(record.ttl);
        // RDLENGTH depends on how well the RDATA compresses at this
        // offset, so it is patched in afterwards.
        let length_at = writer.len();
        writer.write_u16(0);
        let rdata_start = writer.len();
        encode_rdata(writer, &record.rdata)?;
        writer.patch_u16(length_at, (writer.len() - rdata_start) as u16);
    }
    Ok(())
}

fn encode_rdata(writer: &mut WireWriter, rdata: &RData) -> Result<(), DnsError> {
    match rdata {
        RData::A(addr) => writer.write_ipv4(*addr),
        RData::AAAA(addr) => writer.write_ipv6(*addr),
        RData::NS(name)
        | RData::MD(name)
        | RData::MF(name)
        | RData::CNAME(name)
        | RData::MB(name)
        | RData::MG(name)
        | RData::MR(name)
        | RData::PTR(name) => writer.write_name(name)?,
        RData::SOA(soa) => {
            writer.write_name(&soa.mname)?;
            writer.write_name(&soa.rname)?;
            writer.write_u32(soa.serial);
            writer.write_u32(soa.refresh);
            writer.write_u32(soa.retry);
            writer.write_u32(soa.expire);
            writer.write_u32(soa.minimum);
        }
        RData::MINFO(minfo) => {
            writer.write_name(&minfo.rmailbx)?;
            writer.write_name(&minfo.emailbx)?;
        }
        RData::HINFO(hinfo) => {
            writer.write_char_string(&hinfo.cpu)?;
            writer.write_char_string(&hinfo.os)?;
        }
        RData::MX(mx) => {
            writer.write_u16(mx.preference);
            writer.write_name(&mx.exchange)?;
        }
        RData::TXT(strings) => {
            for value in strings {
                writer.write_char_string(value)?;
            }
        }
        RData::NULL(bytes) => writer.write_bytes(bytes),
        RData::WKS(wks) => {
            writer.write_ipv4(wks.address);
            writer.write_u8(wks.protocol);
            writer.write_bytes(&wks.bitmap);
        }
    }
    Ok(())
}
