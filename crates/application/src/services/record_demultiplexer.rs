use ferrous_lookup_domain::{RecordSet, ResolvedRecord};

use crate::ports::DnsAnswer;

/// Splits an answer into one `ResolvedRecord` per resource record.
///
/// Kinds come out as A, AAAA, CNAME, MX, NS, PTR, SOA, TXT; inside a kind the
/// response order is kept. NAPTR records are never streamed.
pub struct RecordDemultiplexer;

impl RecordDemultiplexer {
    pub fn demux(answer: DnsAnswer) -> Vec<ResolvedRecord> {
        let server = answer.server;
        let RecordSet {
            a,
            aaaa,
            cname,
            mx,
            ns,
            ptr,
            soa,
            txt,
            naptr: _,
        } = answer.records;

        [a, aaaa, cname, mx, ns, ptr, soa, txt]
            .into_iter()
            .flatten()
            .map(|record| ResolvedRecord::new(record, server))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrous_lookup_domain::{
        DnsClass, RecordData, RecordHeader, RecordType, ResourceRecord, ServerEndpoint,
    };

    fn record(record_type: RecordType, data: RecordData) -> ResourceRecord {
        ResourceRecord::new(
            RecordHeader::new("example.com.", record_type, DnsClass::IN, 300),
            data,
        )
    }

    #[test]
    fn test_demux_orders_by_kind_then_response_order() {
        let server = ServerEndpoint::new("10.0.0.53".parse().unwrap(), 5353);
        let records: RecordSet = vec![
            record(
                RecordType::TXT,
                RecordData::Txt {
                    strings: vec!["v=spf1 -all".to_string()],
                },
            ),
            record(
                RecordType::A,
                RecordData::A {
                    address: "192.0.2.2".parse().unwrap(),
                },
            ),
            record(
                RecordType::A,
                RecordData::A {
                    address: "192.0.2.1".parse().unwrap(),
                },
            ),
        ]
        .into_iter()
        .collect();

        let resolved = RecordDemultiplexer::demux(DnsAnswer::new(server, "example.com", records));

        let kinds: Vec<RecordType> = resolved.iter().map(|r| r.record_type()).collect();
        assert_eq!(kinds, vec![RecordType::A, RecordType::A, RecordType::TXT]);
        assert_eq!(resolved[0].data.to_string(), "192.0.2.2");
        assert_eq!(resolved[1].data.to_string(), "192.0.2.1");
        assert!(resolved.iter().all(|r| r.server == server));
    }

    #[test]
    fn test_demux_skips_naptr() {
        let server = ServerEndpoint::with_default_port("10.0.0.53".parse().unwrap());
        let mut records = RecordSet::new();
        records.push(record(
            RecordType::NAPTR,
            RecordData::Naptr {
                order: 10,
                preference: 100,
                flags: "u".to_string(),
                services: "E2U+sip".to_string(),
                regexp: "!^.*$!sip:a@example.com!".to_string(),
                replacement: ".".to_string(),
            },
        ));

        assert!(RecordDemultiplexer::demux(DnsAnswer::new(server, "x", records)).is_empty());
    }
}
