use ferrous_lookup_application::use_cases::{BulkLookupUseCase, ResolvePtrUseCase};
use ferrous_lookup_domain::{LookupEvent, LookupOptions, RecordType};
use ferrous_lookup_infrastructure::dns::HickoryClientFactory;
use ferrous_lookup_infrastructure::system::{ResolvConf, SystemResolver};
use hickory_proto::op::ResponseCode;
use std::sync::Arc;

mod helpers;
use helpers::{a_record, cname_record, mock_options, ptr_record, MockBehavior, MockDnsServer};

fn no_system() -> Arc<SystemResolver> {
    Arc::new(SystemResolver::new(ResolvConf::default(), None))
}

#[tokio::test]
async fn test_bulk_lookup_against_mock_server() {
    let server = MockDnsServer::start(MockBehavior::answering(vec![
        cname_record("www.example.", "edge.example."),
        a_record("edge.example.", [192, 0, 2, 80]),
    ]))
    .await
    .unwrap();

    let use_case = BulkLookupUseCase::new(no_system(), Arc::new(HickoryClientFactory::new()));
    let options = LookupOptions {
        record_type: RecordType::ANY,
        resolve_cname: true,
        use_resolver_cache: false,
        ..mock_options(server.addr().port(), &["127.0.0.1"])
    };

    let events = use_case
        .start(vec!["www.example".to_string()], options)
        .collect()
        .await;

    // Primary query plus one CNAME follow-up on the same server.
    assert_eq!(server.udp_hits(), 2);
    let seen = server.seen();
    assert_eq!(seen[1].name, "edge.example.");
    assert_eq!(seen[1].record_type, 255);

    let records: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            LookupEvent::Record(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].record_type(), RecordType::A);
    assert!(records.iter().all(|r| r.server.port == server.addr().port()));

    match events.last().unwrap() {
        LookupEvent::Complete(summary) => {
            assert_eq!(summary.queries, 2);
            assert_eq!(summary.errors, 0);
        }
        other => panic!("expected Complete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_system_suffix_is_applied() {
    let server = MockDnsServer::start(MockBehavior::default()).await.unwrap();
    let conf = ResolvConf::parse("search corp.example lab.example\n");
    let system = Arc::new(SystemResolver::new(conf, None));

    let use_case = BulkLookupUseCase::new(system, Arc::new(HickoryClientFactory::new()));
    let events = use_case
        .start(
            vec!["printer".to_string(), "nas.lan".to_string()],
            mock_options(server.addr().port(), &["127.0.0.1"]),
        )
        .collect()
        .await;

    assert!(events.last().unwrap().is_complete());
    let names: Vec<String> = server.seen().into_iter().map(|q| q.name).collect();
    assert_eq!(names, vec!["printer.corp.example.", "nas.lan."]);
}

#[tokio::test]
async fn test_reverse_lookup_falls_back_to_next_server() {
    let first = MockDnsServer::start(MockBehavior::rcode(ResponseCode::NXDomain))
        .await
        .unwrap();
    let port = first.addr().port();
    let second = MockDnsServer::start_on(
        "127.0.0.2".parse().unwrap(),
        port,
        MockBehavior::answering(vec![ptr_record("5.2.0.192.in-addr.arpa.", "host.example.")]),
    )
    .await
    .unwrap();

    let use_case = ResolvePtrUseCase::new(no_system(), Arc::new(HickoryClientFactory::new()));
    let result = use_case
        .execute(
            "192.0.2.5".parse().unwrap(),
            &mock_options(port, &["127.0.0.1", "127.0.0.2"]),
        )
        .await
        .unwrap();

    assert_eq!(result.server.address.to_string(), "127.0.0.2");
    assert_eq!(result.names, vec!["host.example."]);
    assert_eq!(first.seen()[0].name, "5.2.0.192.in-addr.arpa.");
    assert_eq!(second.udp_hits(), 1);
}
