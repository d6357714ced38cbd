use async_trait::async_trait;
use ferrous_lookup_application::ports::{DnsAnswer, DnsClient, DnsClientFactory};
use ferrous_lookup_domain::{
    DnsClass, DomainError, LookupError, LookupOptions, RecordSet, RecordType, ServerEndpoint,
    TransportType,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use super::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use super::transport::{create_transport, Transport};

/// Per-client settings taken from the call's options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub recursion: bool,

    pub transport: TransportType,

    pub use_cache: bool,

    pub attempts: u32,

    pub timeout: Duration,
}

impl From<&LookupOptions> for ClientSettings {
    fn from(options: &LookupOptions) -> Self {
        Self {
            recursion: options.recursion,
            transport: options.transport,
            use_cache: options.use_resolver_cache,
            attempts: options.effective_attempts(),
            timeout: options.timeout,
        }
    }
}

type CacheKey = (String, RecordType, DnsClass);

/// Queries one server over UDP or TCP using hickory-proto messages.
///
/// Transport failures are retried up to `attempts` times. A truncated UDP reply is
/// re-asked once over TCP. Anything but NOERROR is reported as an error naming the
/// response code.
pub struct HickoryDnsClient {
    server: ServerEndpoint,
    settings: ClientSettings,
    transport: Transport,
    cache: Mutex<HashMap<CacheKey, RecordSet>>,
}

impl HickoryDnsClient {
    pub fn new(server: ServerEndpoint, settings: ClientSettings) -> Self {
        Self {
            server,
            settings,
            transport: create_transport(settings.transport, server),
            cache: Mutex::new(HashMap::new()),
        }
    }

    async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
        class: DnsClass,
    ) -> Result<RecordSet, DomainError> {
        let key = (name.to_ascii_lowercase(), record_type, class);

        if self.settings.use_cache {
            if let Some(records) = self.cached(&key) {
                debug!(server = %self.server, name, "Answer served from client cache");
                return Ok(records);
            }
        }

        let response = self.exchange(name, record_type, class).await?;

        if !response.is_success() {
            return Err(DomainError::ResponseCode {
                server: self.server.to_string(),
                code: ResponseParser::rcode_to_status(response.rcode),
            });
        }

        if self.settings.use_cache {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert(key, response.records.clone());
            }
        }

        Ok(response.records)
    }

    fn cached(&self, key: &CacheKey) -> Option<RecordSet> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
        class: DnsClass,
    ) -> Result<DnsResponse, DomainError> {
        let query = MessageBuilder::build_query(name, record_type, class, self.settings.recursion)?;
        let attempts = self.settings.attempts.max(1);
        let mut last_error = DomainError::QueryTimeout;

        for attempt in 1..=attempts {
            match self.send_once(&self.transport, query.id, &query.bytes).await {
                Ok(response) if response.truncated && self.settings.transport == TransportType::Udp => {
                    debug!(server = %self.server, name, "Truncated UDP answer, retrying over TCP");
                    let tcp = create_transport(TransportType::Tcp, self.server);
                    return self.send_once(&tcp, query.id, &query.bytes).await;
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < attempts => {
                    debug!(
                        server = %self.server,
                        name,
                        attempt,
                        attempts,
                        error = %e,
                        "Query attempt failed, retrying"
                    );
                    last_error = e;
                }
                Err(e) => {
                    last_error = e;
                    break;
                }
            }
        }

        warn!(server = %self.server, name, error = %last_error, "Query failed");
        Err(last_error)
    }

    async fn send_once(
        &self,
        transport: &Transport,
        id: u16,
        bytes: &[u8],
    ) -> Result<DnsResponse, DomainError> {
        let reply = transport.send(bytes, self.settings.timeout).await?;
        let response = ResponseParser::parse(&reply.bytes)?;

        if response.id != id {
            // Counts as a failed attempt.
            return Err(DomainError::Io(format!(
                "response id {} does not match query id {} from {} over {}",
                response.id, id, self.server, reply.protocol_used
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl DnsClient for HickoryDnsClient {
    fn server(&self) -> ServerEndpoint {
        self.server
    }

    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
        class: DnsClass,
    ) -> Result<DnsAnswer, LookupError> {
        debug!(
            server = %self.server,
            name,
            record_type = %record_type,
            class = %class,
            protocol = self.transport.protocol_name(),
            "Sending query"
        );

        self.resolve(name, record_type, class)
            .await
            .map(|records| DnsAnswer::new(self.server, name, records))
            .map_err(|e| LookupError::new(e.to_string(), self.server, name))
    }
}

/// Builds one `HickoryDnsClient` per (host, server) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct HickoryClientFactory;

impl HickoryClientFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DnsClientFactory for HickoryClientFactory {
    fn create(&self, server: ServerEndpoint, options: &LookupOptions) -> Arc<dyn DnsClient> {
        Arc::new(HickoryDnsClient::new(server, ClientSettings::from(options)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_options() {
        let options = LookupOptions {
            recursion: false,
            transport: TransportType::Tcp,
            use_resolver_cache: false,
            attempts: 0,
            timeout: Duration::from_millis(500),
            ..LookupOptions::default()
        };

        let settings = ClientSettings::from(&options);
        assert!(!settings.recursion);
        assert_eq!(settings.transport, TransportType::Tcp);
        assert!(!settings.use_cache);
        assert_eq!(settings.attempts, 1);
        assert_eq!(settings.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_factory_binds_client_to_server() {
        let server = ServerEndpoint::new("192.0.2.53".parse().unwrap(), 5353);
        let client = HickoryClientFactory::new().create(server, &LookupOptions::default());
        assert_eq!(client.server(), server);
    }
}
