use super::{DnsClass, RecordType};
use crate::ServerEndpoint;
use serde::Serialize;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Owner name, type, class and TTL of one resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordHeader {
    pub name: String,

    pub record_type: RecordType,

    pub class: DnsClass,

    pub ttl: u32,
}

impl RecordHeader {
    pub fn new(name: impl Into<String>, record_type: RecordType, class: DnsClass, ttl: u32) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
            ttl,
        }
    }
}

/// Kind-specific payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum RecordData {
    A {
        address: Ipv4Addr,
    },
    #[serde(rename = "AAAA")]
    Aaaa {
        address: Ipv6Addr,
    },
    Cname {
        target: String,
    },
    Mx {
        preference: u16,
        exchange: String,
    },
    Ns {
        name: String,
    },
    Ptr {
        name: String,
    },
    Soa {
        mname: String,
        rname: String,
        serial: u32,
        refresh: i32,
        retry: i32,
        expire: i32,
        minimum: u32,
    },
    Txt {
        strings: Vec<String>,
    },
    Naptr {
        order: u16,
        preference: u16,
        flags: String,
        services: String,
        regexp: String,
        replacement: String,
    },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A { .. } => RecordType::A,
            RecordData::Aaaa { .. } => RecordType::AAAA,
            RecordData::Cname { .. } => RecordType::CNAME,
            RecordData::Mx { .. } => RecordType::MX,
            RecordData::Ns { .. } => RecordType::NS,
            RecordData::Ptr { .. } => RecordType::PTR,
            RecordData::Soa { .. } => RecordType::SOA,
            RecordData::Txt { .. } => RecordType::TXT,
            RecordData::Naptr { .. } => RecordType::NAPTR,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A { address } => write!(f, "{}", address),
            RecordData::Aaaa { address } => write!(f, "{}", address),
            RecordData::Cname { target } => write!(f, "{}", target),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::Ns { name } | RecordData::Ptr { name } => write!(f, "{}", name),
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{} {} {} {} {} {} {}",
                mname, rname, serial, refresh, retry, expire, minimum
            ),
            RecordData::Txt { strings } => {
                let quoted: Vec<String> = strings.iter().map(|s| format!("\"{}\"", s)).collect();
                write!(f, "{}", quoted.join(" "))
            }
            RecordData::Naptr {
                order,
                preference,
                flags,
                services,
                regexp,
                replacement,
            } => write!(
                f,
                "{} {} \"{}\" \"{}\" \"{}\" {}",
                order, preference, flags, services, regexp, replacement
            ),
        }
    }
}

/// A decoded resource record as the message layer hands it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub header: RecordHeader,

    pub data: RecordData,
}

impl ResourceRecord {
    pub fn new(header: RecordHeader, data: RecordData) -> Self {
        Self { header, data }
    }
}

/// A record delivered to the caller, tagged with the server that answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub header: RecordHeader,

    pub data: RecordData,

    pub server: ServerEndpoint,
}

impl ResolvedRecord {
    pub fn new(record: ResourceRecord, server: ServerEndpoint) -> Self {
        Self {
            header: record.header,
            data: record.data,
            server,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }
}

impl fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t@{}",
            self.header.name,
            self.header.ttl,
            self.header.class,
            self.record_type(),
            self.data,
            self.server
        )
    }
}
