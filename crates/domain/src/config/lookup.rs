use crate::dns_protocol::DEFAULT_DNS_PORT;
use crate::lookup_options::DEFAULT_MAX_CONCURRENT_QUERIES;
use crate::{DnsClass, LookupOptions, RecordType, TransportType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[lookup]` section of the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    #[serde(default = "default_record_type")]
    pub record_type: RecordType,

    #[serde(default)]
    pub class: DnsClass,

    #[serde(default)]
    pub use_custom_dns_server: bool,

    #[serde(default)]
    pub custom_dns_servers: Vec<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub recursion: bool,

    #[serde(default)]
    pub transport: TransportType,

    #[serde(default = "default_true")]
    pub use_resolver_cache: bool,

    #[serde(default = "default_attempts")]
    pub attempts: u32,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub add_dns_suffix: bool,

    #[serde(default)]
    pub use_custom_dns_suffix: bool,

    #[serde(default)]
    pub custom_dns_suffix: String,

    #[serde(default)]
    pub resolve_cname: bool,

    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            record_type: default_record_type(),
            class: DnsClass::IN,
            use_custom_dns_server: false,
            custom_dns_servers: Vec::new(),
            port: default_port(),
            recursion: true,
            transport: TransportType::Udp,
            use_resolver_cache: true,
            attempts: default_attempts(),
            timeout_ms: default_timeout_ms(),
            add_dns_suffix: true,
            use_custom_dns_suffix: false,
            custom_dns_suffix: String::new(),
            resolve_cname: false,
            max_concurrent_queries: default_max_concurrent_queries(),
        }
    }
}

impl LookupConfig {
    pub fn to_options(&self) -> LookupOptions {
        LookupOptions {
            record_type: self.record_type,
            class: self.class,
            use_custom_dns_server: self.use_custom_dns_server,
            custom_dns_servers: self.custom_dns_servers.clone(),
            port: self.port,
            recursion: self.recursion,
            transport: self.transport,
            use_resolver_cache: self.use_resolver_cache,
            attempts: self.attempts,
            timeout: Duration::from_millis(self.timeout_ms),
            add_dns_suffix: self.add_dns_suffix,
            use_custom_dns_suffix: self.use_custom_dns_suffix,
            custom_dns_suffix: self.custom_dns_suffix.clone(),
            resolve_cname: self.resolve_cname,
            max_concurrent_queries: self.max_concurrent_queries,
        }
    }
}

fn default_record_type() -> RecordType {
    RecordType::A
}

fn default_port() -> u16 {
    DEFAULT_DNS_PORT
}

fn default_true() -> bool {
    true
}

fn default_attempts() -> u32 {
    3
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_max_concurrent_queries() -> usize {
    DEFAULT_MAX_CONCURRENT_QUERIES
}
