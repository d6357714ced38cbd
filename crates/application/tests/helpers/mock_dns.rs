use async_trait::async_trait;
use ferrous_lookup_application::ports::{
    DnsAnswer, DnsClient, DnsClientFactory, SystemResolverConfig,
};
use ferrous_lookup_domain::{
    DnsClass, LookupError, LookupEvent, LookupOptions, RecordData, RecordHeader, RecordSet,
    RecordType, ResourceRecord, ServerEndpoint,
};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

pub struct MockSystemResolverConfig {
    servers: Vec<IpAddr>,
    suffix: Option<String>,
}

impl MockSystemResolverConfig {
    pub fn new(servers: &[&str], suffix: Option<&str>) -> Self {
        Self {
            servers: servers.iter().map(|s| s.parse().unwrap()).collect(),
            suffix: suffix.map(str::to_string),
        }
    }

    pub fn empty() -> Self {
        Self {
            servers: Vec::new(),
            suffix: None,
        }
    }
}

impl SystemResolverConfig for MockSystemResolverConfig {
    fn name_servers(&self) -> Vec<IpAddr> {
        self.servers.clone()
    }

    fn domain_suffix(&self) -> Option<String> {
        self.suffix.clone()
    }
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Records(Vec<ResourceRecord>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub server: ServerEndpoint,
    pub name: String,
    pub record_type: RecordType,
}

#[derive(Default)]
struct MockState {
    by_name: RwLock<HashMap<(IpAddr, String), MockResponse>>,
    by_server: RwLock<HashMap<IpAddr, MockResponse>>,
    delays: RwLock<HashMap<IpAddr, Duration>>,
    calls: Mutex<Vec<RecordedQuery>>,
    clients_created: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Scripted client factory. Unscripted queries get an empty NOERROR answer.
#[derive(Clone, Default)]
pub struct MockDnsClientFactory {
    state: Arc<MockState>,
}

impl MockDnsClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, server: &str, name: &str, response: MockResponse) {
        self.state
            .by_name
            .write()
            .unwrap()
            .insert((server.parse().unwrap(), name.to_string()), response);
    }

    pub fn respond_all(&self, server: &str, response: MockResponse) {
        self.state
            .by_server
            .write()
            .unwrap()
            .insert(server.parse().unwrap(), response);
    }

    pub fn delay(&self, server: &str, delay: Duration) {
        self.state
            .delays
            .write()
            .unwrap()
            .insert(server.parse().unwrap(), delay);
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, server: &str) -> Vec<RecordedQuery> {
        let address: IpAddr = server.parse().unwrap();
        self.calls()
            .into_iter()
            .filter(|c| c.server.address == address)
            .collect()
    }

    pub fn clients_created(&self) -> usize {
        self.state.clients_created.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl DnsClientFactory for MockDnsClientFactory {
    fn create(&self, server: ServerEndpoint, _options: &LookupOptions) -> Arc<dyn DnsClient> {
        self.state.clients_created.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockDnsClient {
            server,
            state: Arc::clone(&self.state),
        })
    }
}

struct MockDnsClient {
    server: ServerEndpoint,
    state: Arc<MockState>,
}

impl MockDnsClient {
    fn scripted(&self, name: &str) -> MockResponse {
        let key = (self.server.address, name.to_string());
        if let Some(response) = self.state.by_name.read().unwrap().get(&key) {
            return response.clone();
        }
        if let Some(response) = self.state.by_server.read().unwrap().get(&self.server.address) {
            return response.clone();
        }
        MockResponse::Records(Vec::new())
    }
}

#[async_trait]
impl DnsClient for MockDnsClient {
    fn server(&self) -> ServerEndpoint {
        self.server
    }

    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        _class: DnsClass,
    ) -> Result<DnsAnswer, LookupError> {
        self.state.calls.lock().unwrap().push(RecordedQuery {
            server: self.server,
            name: name.to_string(),
            record_type,
        });

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .state
            .delays
            .read()
            .unwrap()
            .get(&self.server.address)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.scripted(name) {
            MockResponse::Records(records) => Ok(DnsAnswer::new(
                self.server,
                name,
                records.into_iter().collect::<RecordSet>(),
            )),
            MockResponse::Error(message) => Err(LookupError::new(message, self.server, name)),
        }
    }
}

pub fn a_record(name: &str, address: &str) -> ResourceRecord {
    ResourceRecord::new(
        RecordHeader::new(name, RecordType::A, DnsClass::IN, 300),
        RecordData::A {
            address: address.parse().unwrap(),
        },
    )
}

pub fn cname_record(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        RecordHeader::new(name, RecordType::CNAME, DnsClass::IN, 300),
        RecordData::Cname {
            target: target.to_string(),
        },
    )
}

pub fn ptr_record(name: &str, target: &str) -> ResourceRecord {
    ResourceRecord::new(
        RecordHeader::new(name, RecordType::PTR, DnsClass::IN, 300),
        RecordData::Ptr {
            name: target.to_string(),
        },
    )
}

pub fn mx_record(name: &str, preference: u16, exchange: &str) -> ResourceRecord {
    ResourceRecord::new(
        RecordHeader::new(name, RecordType::MX, DnsClass::IN, 300),
        RecordData::Mx {
            preference,
            exchange: exchange.to_string(),
        },
    )
}

pub fn custom_options(servers: &[&str]) -> LookupOptions {
    LookupOptions::default().with_custom_servers(
        servers.iter().map(|s| s.to_string()).collect(),
        5353,
    )
}

pub fn records_of(events: &[LookupEvent]) -> Vec<&ferrous_lookup_domain::ResolvedRecord> {
    events
        .iter()
        .filter_map(|e| match e {
            LookupEvent::Record(r) => Some(r),
            _ => None,
        })
        .collect()
}

pub fn errors_of(events: &[LookupEvent]) -> Vec<&LookupError> {
    events
        .iter()
        .filter_map(|e| match e {
            LookupEvent::Error(e) => Some(e),
            _ => None,
        })
        .collect()
}
