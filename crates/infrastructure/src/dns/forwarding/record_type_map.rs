//! Mapping between the domain record types/classes and `hickory_proto`'s.

use ferrous_lookup_domain::{DnsClass, RecordType};
use hickory_proto::rr::{DNSClass as HickoryClass, RecordType as HickoryRecordType};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::PTR => HickoryRecordType::PTR,
            RecordType::SOA => HickoryRecordType::SOA,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::NAPTR => HickoryRecordType::NAPTR,
            RecordType::ANY => HickoryRecordType::ANY,
        }
    }

    /// Returns `None` for types the lookup never reports.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::CNAME => Some(RecordType::CNAME),
            HickoryRecordType::MX => Some(RecordType::MX),
            HickoryRecordType::NS => Some(RecordType::NS),
            HickoryRecordType::PTR => Some(RecordType::PTR),
            HickoryRecordType::SOA => Some(RecordType::SOA),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            HickoryRecordType::NAPTR => Some(RecordType::NAPTR),
            HickoryRecordType::ANY => Some(RecordType::ANY),
            _ => None,
        }
    }

    pub fn class_to_hickory(class: DnsClass) -> HickoryClass {
        match class {
            DnsClass::IN => HickoryClass::IN,
            DnsClass::CH => HickoryClass::CH,
            DnsClass::HS => HickoryClass::HS,
            DnsClass::ANY => HickoryClass::ANY,
        }
    }

    pub fn class_from_hickory(class: HickoryClass) -> Option<DnsClass> {
        match class {
            HickoryClass::IN => Some(DnsClass::IN),
            HickoryClass::CH => Some(DnsClass::CH),
            HickoryClass::HS => Some(DnsClass::HS),
            HickoryClass::ANY => Some(DnsClass::ANY),
            _ => None,
        }
    }
}
