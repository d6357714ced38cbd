mod dns_client;
mod system_resolver;

pub use dns_client::{DnsAnswer, DnsClient, DnsClientFactory};
pub use system_resolver::SystemResolverConfig;
