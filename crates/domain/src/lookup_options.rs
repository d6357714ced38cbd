use crate::dns_protocol::DEFAULT_DNS_PORT;
use crate::{DnsClass, RecordType, TransportType};
use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENT_QUERIES: usize = 16;

/// Per-call lookup settings. Read-only for the duration of one call.
///
/// `custom_dns_servers` and `port` only matter when `use_custom_dns_server` is set;
/// the suffix fields only matter when `add_dns_suffix` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    pub record_type: RecordType,

    pub class: DnsClass,

    pub use_custom_dns_server: bool,

    pub custom_dns_servers: Vec<String>,

    pub port: u16,

    pub recursion: bool,

    pub transport: TransportType,

    pub use_resolver_cache: bool,

    /// Sends per query before giving up on a server.
    pub attempts: u32,

    /// Bound on every single send/receive.
    pub timeout: Duration,

    pub add_dns_suffix: bool,

    pub use_custom_dns_suffix: bool,

    pub custom_dns_suffix: String,

    pub resolve_cname: bool,

    /// Cap on in-flight per-server queries for one bulk call.
    pub max_concurrent_queries: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            record_type: RecordType::A,
            class: DnsClass::IN,
            use_custom_dns_server: false,
            custom_dns_servers: Vec::new(),
            port: DEFAULT_DNS_PORT,
            recursion: true,
            transport: TransportType::Udp,
            use_resolver_cache: true,
            attempts: 3,
            timeout: Duration::from_secs(2),
            add_dns_suffix: true,
            use_custom_dns_suffix: false,
            custom_dns_suffix: String::new(),
            resolve_cname: false,
            max_concurrent_queries: DEFAULT_MAX_CONCURRENT_QUERIES,
        }
    }
}

impl LookupOptions {
    /// CNAME targets are only re-queried for ANY lookups with chasing enabled.
    pub fn should_chase_cname(&self) -> bool {
        self.resolve_cname && self.record_type == RecordType::ANY
    }

    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }

    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrent_queries.max(1)
    }

    pub fn with_custom_servers(mut self, servers: Vec<String>, port: u16) -> Self {
        self.use_custom_dns_server = true;
        self.custom_dns_servers = servers;
        self.port = port;
        self
    }

    pub fn with_custom_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.add_dns_suffix = true;
        self.use_custom_dns_suffix = true;
        self.custom_dns_suffix = suffix.into();
        self
    }
}
