use crate::record_type::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: String,
    pub rname: String,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WksData {
    pub address: Ipv4Addr,
    pub protocol: u8,
    pub bitmap: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HinfoData {
    pub cpu: String,
    pub os: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinfoData {
    pub rmailbx: String,
    pub emailbx: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxData {
    pub preference: u16,
    pub exchange: String,
}

/// Type-specific record payload. The variant fixes the record type, so a
/// record can never carry RDATA that disagrees with its TYPE field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    NS(String),
    MD(String),
    MF(String),
    CNAME(String),
    SOA(SoaData),
    MB(String),
    MG(String),
    MR(String),
    NULL(Vec<u8>),
    WKS(WksData),
    PTR(String),
    HINFO(HinfoData),
    MINFO(MinfoData),
    MX(MxData),
    TXT(Vec<String>),
}

impl RData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A(_) => RecordType::A,
            RData::AAAA(_) => RecordType::AAAA,
            RData::NS(_) => RecordType::NS,
            RData::MD(_) => RecordType::MD,
            RData::MF(_) => RecordType::MF,
            RData::CNAME(_) => RecordType::CNAME,
            RData::SOA(_) => RecordType::SOA,
            RData::MB(_) => RecordType::MB,
            RData::MG(_) => RecordType::MG,
            RData::MR(_) => RecordType::MR,
            RData::NULL(_) => RecordType::NULL,
            RData::WKS(_) => RecordType::WKS,
            RData::PTR(_) => RecordType::PTR,
            RData::HINFO(_) => RecordType::HINFO,
            RData::MINFO(_) => RecordType::MINFO,
            RData::MX(_) => RecordType::MX,
            RData::TXT(_) => RecordType::TXT,
        }
    }
}
