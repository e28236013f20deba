use burrow_dns_domain::wire::{decode_message, encode_message};
use burrow_dns_domain::{
    Header, HinfoData, Message, MessageRole, MinfoData, MxData, RData, RecordClass, RecordType,
    ResourceRecord, SoaData, WksData,
};

fn record(name: &str, ttl: u32, rdata: RData) -> ResourceRecord {
    ResourceRecord {
        name: name.to_string(),
        class: RecordClass::IN,
        ttl,
        rdata,
    }
}

fn response_around(answers: Vec<ResourceRecord>) -> Message {
    let mut header = Header::default();
    header.id = 0x0102;
    header.set_qr(true);
    header.set_ra(true);
    header.qd_count = 1;
    header.an_count = answers.len() as u16;
    let mut message = Message::query(0, "example.com.", RecordType::A, RecordClass::IN);
    message.header = header;
    message.answers = answers;
    message
}

#[test]
fn every_rdata_variant_survives_an_encode_decode_cycle() {
    let answers = vec![
        record("example.com.", 300, RData::A("93.184.216.34".parse().unwrap())),
        record(
            "example.com.",
            300,
            RData::AAAA("2606:2800:220:1:248:1893:25c8:1946".parse().unwrap()),
        ),
        record("example.com.", 86400, RData::NS("ns.example.com.".into())),
        record("old.example.com.", 60, RData::MD("mail.example.com.".into())),
        record("old.example.com.", 60, RData::MF("relay.example.com.".into())),
        record("www.example.com.", 120, RData::CNAME("example.com.".into())),
        record(
            "example.com.",
            3600,
            RData::SOA(SoaData {
                mname: "ns.example.com.".into(),
                rname: "hostmaster.example.com.".into(),
                serial: 2024_01_01_01,
                refresh: 7200,
                retry: 1800,
                expire: 1_209_600,
                minimum: 300,
            }),
        ),
        record("box.example.com.", 60, RData::MB("host.example.com.".into())),
        record("list.example.com.", 60, RData::MG("member.example.com.".into())),
        record("list.example.com.", 60, RData::MR("renamed.example.com.".into())),
        record("blob.example.com.", 60, RData::NULL(vec![0xDE, 0xAD, 0xBE, 0xEF])),
        record(
            "example.com.",
            60,
            RData::WKS(WksData {
                address: "192.0.2.1".parse().unwrap(),
                protocol: 6,
                bitmap: vec![0b0000_0001, 0b1000_0000],
            }),
        ),
        record(
            "34.216.184.93.in-addr.arpa.",
            300,
            RData::PTR("example.com.".into()),
        ),
        record(
            "example.com.",
            60,
            RData::HINFO(HinfoData {
                cpu: "AMD64".into(),
                os: "LINUX".into(),
            }),
        ),
        record(
            "example.com.",
            60,
            RData::MINFO(MinfoData {
                rmailbx: "admin.example.com.".into(),
                emailbx: "errors.example.com.".into(),
            }),
        ),
        record(
            "example.com.",
            600,
            RData::MX(MxData {
                preference: 10,
                exchange: "mail.example.com.".into(),
            }),
        ),
        record(
            "example.com.",
            600,
            RData::TXT(vec!["v=spf1 -all".into(), "second string".into()]),
        ),
    ];
    let message = response_around(answers);

    let wire = encode_message(&message).unwrap();
    let decoded = decode_message(&wire, MessageRole::Response).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn rr_sections_roundtrip_independently() {
    let mut message = response_around(Vec::new());
    message.header.an_count = 0;
    message.header.ns_count = 1;
    message.header.ar_count = 1;
    message.authorities = vec![record(
        "com.",
        172_800,
        RData::NS("a.gtld-servers.net.".into()),
    )];
    message.additionals = vec![record(
        "a.gtld-servers.net.",
        172_800,
        RData::A("192.5.6.30".parse().unwrap()),
    )];

    let wire = encode_message(&message).unwrap();
    let decoded = decode_message(&wire, MessageRole::Response).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn compression_never_grows_the_message() {
    // Six answers all owned by the same name: every owner after the
    // question collapses to a two-octet pointer.
    let answers: Vec<ResourceRecord> = (0..6)
        .map(|i| {
            record(
                "example.com.",
                300,
                RData::A(format!("192.0.2.{i}").parse().unwrap()),
            )
        })
        .collect();
    let message = response_around(answers);
    let wire = encode_message(&message).unwrap();

    // Uncompressed: 12 (header) + 17 (question) + 6 * (13 + 10 + 4).
    let uncompressed = 12 + 17 + 6 * 27;
    assert!(wire.len() < uncompressed);
    // Compressed owner: 2 (pointer) + 10 (fixed RR fields) + 4 (RDATA).
    assert_eq!(wire.len(), 12 + 17 + 6 * 16);
}

#[test]
fn ttl_of_zero_survives_the_codec() {
    let message = response_around(vec![record(
        "volatile.example.com.",
        0,
        RData::A("192.0.2.7".parse().unwrap()),
    )]);
    let wire = encode_message(&message).unwrap();
    let decoded = decode_message(&wire, MessageRole::Response).unwrap();
    assert_eq!(decoded.answers[0].ttl, 0);
}
