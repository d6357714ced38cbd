//! Ferrous Lookup Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_record;
pub mod errors;
pub mod lookup_event;
pub mod lookup_options;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{ServerEndpoint, TransportType, DEFAULT_DNS_PORT};
pub use dns_record::{
    DnsClass, RecordData, RecordHeader, RecordSet, RecordType, ResolvedRecord, ResourceRecord,
};
pub use errors::DomainError;
pub use lookup_event::{LookupError, LookupEvent, LookupSummary, PtrResult};
pub use lookup_options::LookupOptions;
