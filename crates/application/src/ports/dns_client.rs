use async_trait::async_trait;
use ferrous_lookup_domain::{
    DnsClass, LookupError, LookupOptions, RecordSet, RecordType, ServerEndpoint,
};
use std::sync::Arc;

/// Decoded answer of one successful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub server: ServerEndpoint,

    pub query_name: String,

    pub records: RecordSet,
}

impl DnsAnswer {
    pub fn new(server: ServerEndpoint, query_name: impl Into<String>, records: RecordSet) -> Self {
        Self {
            server,
            query_name: query_name.into(),
            records,
        }
    }
}

/// A client bound to exactly one server.
///
/// Failures come back as `LookupError` values tagged with that server.
#[async_trait]
pub trait DnsClient: Send + Sync {
    fn server(&self) -> ServerEndpoint;

    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        class: DnsClass,
    ) -> Result<DnsAnswer, LookupError>;
}

/// Builds a fresh client per (host, server) pair so concurrent lookups never share
/// client state.
pub trait DnsClientFactory: Send + Sync {
    fn create(&self, server: ServerEndpoint, options: &LookupOptions) -> Arc<dyn DnsClient>;
}
