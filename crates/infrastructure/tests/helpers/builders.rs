use ferrous_lookup_domain::{LookupOptions, TransportType};
use hickory_proto::rr::rdata::{A, CNAME, PTR};
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn a_record(owner: &str, address: [u8; 4]) -> Record {
    Record::from_rdata(name(owner), 300, RData::A(A(Ipv4Addr::from(address))))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

pub fn ptr_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::PTR(PTR(name(target))))
}

/// Options aimed at one mock server: short timeout, single attempt.
pub fn mock_options(port: u16, servers: &[&str]) -> LookupOptions {
    LookupOptions {
        attempts: 1,
        timeout: Duration::from_millis(300),
        transport: TransportType::Udp,
        ..LookupOptions::default()
    }
    .with_custom_servers(servers.iter().map(|s| s.to_string()).collect(), port)
}
