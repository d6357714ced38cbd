use super::record_type_map::RecordTypeMapper;
use ferrous_lookup_domain::{
    DnsClass, DomainError, RecordData, RecordHeader, RecordSet, ResourceRecord,
};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{RData, Record};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    pub truncated: bool,

    /// Answer-section records the lookup knows how to report.
    pub records: RecordSet,
}

impl DnsResponse {
    pub fn is_success(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.message_type() != MessageType::Response {
            return Err(DomainError::InvalidDnsResponse(
                "QR bit not set in reply".to_string(),
            ));
        }

        let mut records = RecordSet::new();
        let mut skipped = 0usize;

        for record in message.answers() {
            match Self::convert_record(record) {
                Some(converted) => records.push(converted),
                None => skipped += 1,
            }
        }

        let response = DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            truncated: message.truncated(),
            records,
        };

        debug!(
            id = response.id,
            rcode = %Self::rcode_to_status(response.rcode),
            answers = message.answers().len(),
            skipped,
            truncated = response.truncated,
            "DNS response parsed"
        );

        Ok(response)
    }

    /// `None` for record kinds the lookup does not model (SRV, OPT, DNSSEC, ...).
    pub fn convert_record(record: &Record) -> Option<ResourceRecord> {
        let data = match record.data() {
            RData::A(a) => RecordData::A { address: a.0 },
            RData::AAAA(aaaa) => RecordData::Aaaa { address: aaaa.0 },
            RData::CNAME(canonical) => RecordData::Cname {
                target: canonical.to_utf8(),
            },
            RData::MX(mx) => RecordData::Mx {
                preference: mx.preference(),
                exchange: mx.exchange().to_utf8(),
            },
            RData::NS(ns) => RecordData::Ns {
                name: ns.to_utf8(),
            },
            RData::PTR(ptr) => RecordData::Ptr {
                name: ptr.to_utf8(),
            },
            RData::SOA(soa) => RecordData::Soa {
                mname: soa.mname().to_utf8(),
                rname: soa.rname().to_utf8(),
                serial: soa.serial(),
                refresh: soa.refresh() as i32,
                retry: soa.retry() as i32,
                expire: soa.expire() as i32,
                minimum: soa.minimum(),
            },
            RData::TXT(txt) => RecordData::Txt {
                strings: txt.txt_data().iter().map(|s| lossy(s)).collect(),
            },
            RData::NAPTR(naptr) => RecordData::Naptr {
                order: naptr.order(),
                preference: naptr.preference(),
                flags: lossy(naptr.flags()),
                services: lossy(naptr.services()),
                regexp: lossy(naptr.regexp()),
                replacement: naptr.replacement().to_utf8(),
            },
            _ => return None,
        };

        let class = RecordTypeMapper::class_from_hickory(record.dns_class()).unwrap_or(DnsClass::IN);
        let header = RecordHeader::new(
            record.name().to_utf8(),
            data.record_type(),
            class,
            record.ttl(),
        );

        Some(ResourceRecord::new(header, data))
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> String {
        let status = match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            other => return format!("RCODE{}", u16::from(other)),
        };
        status.to_string()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
