use crate::errors::DnsError;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

const POINTER_FLAG: u16 = 0xC000;

/// Compression offsets occupy 14 bits; suffixes further out are written
/// in full.
const MAX_POINTER_OFFSET: usize = 0x3FFF;
const MAX_LABEL_LEN: usize = 63;
const MAX_ENCODED_NAME_LEN: usize = 255;
const MAX_CHAR_STRING_LEN: usize = 255;

/// Append-only message builder. Owns the suffix → offset table used for
/// name compression; offsets are absolute because the message always
/// starts at offset zero of the buffer.
pub(super) struct WireWriter {
    buf: Vec<u8>,
    name_offsets: HashMap<String, usize>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(crate::wire::MAX_UDP_MESSAGE_SIZE),
            name_offsets: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_ipv4(&mut self, addr: Ipv4Addr) {
        self.buf.extend_from_slice(&addr.octets());
    }

    pub fn write_ipv6(&mut self, addr: Ipv6Addr) {
        self.buf.extend_from_slice(&addr.octets());
    }

    /// Backfills a 16-bit field written earlier (RDLENGTH, whose value is
    /// only known once the RDATA behind it has been written).
    pub fn patch_u16(&mut self, at: usize, value: u16) {
        self.buf[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub fn write_char_string(&mut self, value: &str) -> Result<(), DnsError> {
        if value.len() > MAX_CHAR_STRING_LEN {
            return Err(DnsError::InvalidRecordData(
                "character-string exceeds 255 octets",
            ));
        }
        self.write_u8(value.len() as u8);
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Emits a domain name, compressing against every suffix already
    /// written into this message. The terminating zero octet is omitted
    /// only when a pointer ends the name.
    pub fn write_name(&mut self, name: &str) -> Result<(), DnsError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            self.write_u8(0);
            return Ok(());
        }
        if trimmed.len() + 2 > MAX_ENCODED_NAME_LEN {
            return Err(DnsError::InvalidName(name.to_string()));
        }
        let labels: Vec<&str> = trimmed.split('.').collect();
        for i in 0..labels.len() {
            let label = labels[i];
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(DnsError::InvalidName(name.to_string()));
            }
            let suffix = labels[i..].join(".");
            if let Some(&offset) = self.name_offsets.get(&suffix) {
                if offset <= MAX_POINTER_OFFSET {
                    self.write_u16(POINTER_FLAG | offset as u16);
                    return Ok(());
                }
            } else {
                self.name_offsets.insert(suffix, self.buf.len());
            }
            self.write_u8(label.len() as u8);
            self.write_bytes(label.as_bytes());
        }
        self.write_u8(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_name_is_a_single_zero_octet() {
        let mut writer = WireWriter::new();
        writer.write_name(".").unwrap();
        assert_eq!(writer.into_bytes(), vec![0x00]);
    }

    #[test]
    fn repeated_name_compresses_to_a_pointer() {
        let mut writer = WireWriter::new();
        writer.write_name("example.com.").unwrap();
        writer.write_name("example.com.").unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(
            bytes,
            vec![
                0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
                0xC0, 0x00,
            ]
        );
    }

    #[test]
    fn shared_suffix_compresses_mid_name() {
        let mut writer = WireWriter::new();
        writer.write_name("example.com.").unwrap();
        writer.write_name("www.example.com.").unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(
            &bytes[13..],
            &[0x03, b'w', b'w', b'w', 0xC0, 0x00][..]
        );
    }

    #[test]
    fn oversized_label_is_rejected() {
        let mut writer = WireWriter::new();
        let label = "a".repeat(64);
        assert!(matches!(
            writer.write_name(&format!("{label}.com.")),
            Err(DnsError::InvalidName(_))
        ));
    }
}
