use ferrous_lookup_domain::{DnsClass, DomainError, LookupOptions, PtrResult, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::ports::{DnsClientFactory, SystemResolverConfig};
use crate::services::{reverse_name, ServerListResolver};

/// Resolves one address to its PTR names, trying servers strictly in order.
///
/// The scan stops at the first server whose answer holds at least one PTR record.
/// Errors and empty answers both move on to the next server. When nothing is
/// found the last server tried is returned with no names.
#[derive(Clone)]
pub struct ResolvePtrUseCase {
    servers: ServerListResolver,
    clients: Arc<dyn DnsClientFactory>,
}

impl ResolvePtrUseCase {
    pub fn new(system: Arc<dyn SystemResolverConfig>, clients: Arc<dyn DnsClientFactory>) -> Self {
        Self {
            servers: ServerListResolver::new(system),
            clients,
        }
    }

    pub async fn execute(
        &self,
        address: IpAddr,
        options: &LookupOptions,
    ) -> Result<PtrResult, DomainError> {
        self.execute_with_cancellation(address, options, &CancellationToken::new())
            .await
    }

    #[instrument(skip_all, fields(address = %address))]
    pub async fn execute_with_cancellation(
        &self,
        address: IpAddr,
        options: &LookupOptions,
        cancel: &CancellationToken,
    ) -> Result<PtrResult, DomainError> {
        let servers = self.servers.resolve(options);
        let Some(&first) = servers.first() else {
            return Err(DomainError::NoServersConfigured);
        };

        let name = reverse_name(&address);
        let mut last_tried = first;

        for (position, server) in servers.into_iter().enumerate() {
            if cancel.is_cancelled() {
                debug!(position, "Reverse lookup cancelled");
                return Err(DomainError::Cancelled);
            }

            last_tried = server;
            let client = self.clients.create(server, options);

            match client.query(&name, RecordType::PTR, DnsClass::IN).await {
                Ok(answer) => {
                    let names = answer.records.ptr_names();
                    if !names.is_empty() {
                        info!(server = %server, names = names.len(), "PTR lookup resolved");
                        return Ok(PtrResult::new(server, names));
                    }
                    debug!(server = %server, position, "Empty PTR answer, trying next server");
                }
                Err(e) => {
                    debug!(server = %server, error = %e, position, "PTR query failed, trying next server");
                }
            }
        }

        info!(server = %last_tried, "PTR lookup exhausted all servers");
        Ok(PtrResult::new(last_tried, Vec::new()))
    }

    /// Runs the scan in the background.
    pub fn spawn(
        &self,
        address: IpAddr,
        options: LookupOptions,
    ) -> JoinHandle<Result<PtrResult, DomainError>> {
        let use_case = self.clone();
        tokio::spawn(async move { use_case.execute(address, &options).await })
    }
}
