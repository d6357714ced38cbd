use ferrous_lookup_domain::{LookupError, LookupEvent, LookupOptions, LookupSummary, ServerEndpoint};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::ports::{DnsAnswer, DnsClient, DnsClientFactory, SystemResolverConfig};
use crate::services::{
    LookupNotifier, QueryName, QueryNameBuilder, RecordDemultiplexer, ServerListResolver,
};

/// Looks up a list of hosts against every configured server.
///
/// Hosts are handled one after another; for each host all servers are queried
/// concurrently. Results stream out as `LookupEvent`s and a single `Complete`
/// closes the stream once every host is done.
#[derive(Clone)]
pub struct BulkLookupUseCase {
    servers: ServerListResolver,
    names: QueryNameBuilder,
    clients: Arc<dyn DnsClientFactory>,
}

impl BulkLookupUseCase {
    pub fn new(system: Arc<dyn SystemResolverConfig>, clients: Arc<dyn DnsClientFactory>) -> Self {
        Self {
            servers: ServerListResolver::new(Arc::clone(&system)),
            names: QueryNameBuilder::new(system),
            clients,
        }
    }

    /// Starts the lookup in the background and returns immediately.
    pub fn start(&self, hosts: Vec<String>, options: LookupOptions) -> LookupHandle {
        self.start_with_cancellation(hosts, options, CancellationToken::new())
    }

    /// Like `start`, but `cancel` also stops the lookup. The handle works on a
    /// child of `cancel`, so dropping or cancelling the handle leaves it untouched.
    pub fn start_with_cancellation(
        &self,
        hosts: Vec<String>,
        options: LookupOptions,
        cancel: CancellationToken,
    ) -> LookupHandle {
        let (notifier, events) = LookupNotifier::channel();
        let use_case = self.clone();
        let cancel = cancel.child_token();
        let token = cancel.clone();
        tokio::spawn(async move { use_case.run(hosts, options, notifier, token).await });

        LookupHandle { events, cancel }
    }

    /// Drives the whole call on the current task.
    ///
    /// After cancellation no new query is issued. Queries already in flight finish
    /// (or time out) and their events are still delivered.
    pub async fn run(
        &self,
        hosts: Vec<String>,
        options: LookupOptions,
        notifier: LookupNotifier,
        cancel: CancellationToken,
    ) -> LookupSummary {
        let options = Arc::new(options);
        let servers = self.servers.resolve(&options);

        info!(
            hosts = hosts.len(),
            servers = servers.len(),
            record_type = %options.record_type,
            transport = %options.transport,
            "Starting bulk lookup"
        );

        if servers.is_empty() {
            warn!("No DNS servers to query");
            notifier.error(LookupError::no_servers());
            return notifier.complete(0, 0, cancel.is_cancelled());
        }

        let limiter = Arc::new(Semaphore::new(options.effective_concurrency()));
        let mut processed = 0;

        for host in &hosts {
            if cancel.is_cancelled() {
                debug!(remaining = hosts.len() - processed, "Bulk lookup cancelled");
                break;
            }
            if host.trim().is_empty() {
                warn!("Skipping empty host");
                continue;
            }

            let query = self.names.build(host, &options);
            self.fan_out(&query, &servers, &options, &notifier, &cancel, &limiter)
                .await;
            processed += 1;
        }

        let summary = notifier.complete(processed, servers.len(), cancel.is_cancelled());
        info!(
            hosts = summary.hosts,
            queries = summary.queries,
            records = summary.records,
            errors = summary.errors,
            cancelled = summary.cancelled,
            "Bulk lookup complete"
        );
        summary
    }

    async fn fan_out(
        &self,
        query: &QueryName,
        servers: &[ServerEndpoint],
        options: &Arc<LookupOptions>,
        notifier: &LookupNotifier,
        cancel: &CancellationToken,
        limiter: &Arc<Semaphore>,
    ) {
        debug!(name = %query.name, record_type = %query.record_type, servers = servers.len(), "Fanning out");

        let mut workers = FuturesUnordered::new();

        for &server in servers {
            if cancel.is_cancelled() {
                break;
            }

            let worker = ServerWorker {
                client: self.clients.create(server, options),
                query: query.clone(),
                options: Arc::clone(options),
                notifier: notifier.clone(),
                cancel: cancel.clone(),
                limiter: Arc::clone(limiter),
            };
            let handle = tokio::spawn(worker.run());
            workers.push(async move { (server, handle.await) });
        }

        while let Some((server, joined)) = workers.next().await {
            if let Err(e) = joined {
                warn!(server = %server, error = %e, "Lookup worker failed");
                notifier.error(LookupError::new(
                    format!("lookup worker failed: {}", e),
                    server,
                    query.name.clone(),
                ));
            }
        }
    }
}

/// Queries one server for one host, then chases CNAMEs on that same server.
struct ServerWorker {
    client: Arc<dyn DnsClient>,
    query: QueryName,
    options: Arc<LookupOptions>,
    notifier: LookupNotifier,
    cancel: CancellationToken,
    limiter: Arc<Semaphore>,
}

impl ServerWorker {
    async fn run(self) {
        let answer = match self.send(&self.query.name).await {
            Some(Ok(answer)) => answer,
            Some(Err(e)) => {
                debug!(server = %self.client.server(), error = %e, "Query failed");
                self.notifier.error(e);
                return;
            }
            None => return,
        };

        let targets = if self.options.should_chase_cname() {
            answer.records.cname_targets()
        } else {
            Vec::new()
        };

        self.notifier.records(RecordDemultiplexer::demux(answer));

        for target in targets {
            debug!(server = %self.client.server(), target = %target, "Chasing CNAME");
            match self.send(&target).await {
                Some(Ok(answer)) => self.notifier.records(RecordDemultiplexer::demux(answer)),
                Some(Err(e)) => {
                    debug!(server = %self.client.server(), error = %e, "CNAME chase failed");
                    self.notifier.error(e.as_chase());
                }
                None => break,
            }
        }
    }

    /// `None` when the call was cancelled before the query could be sent.
    async fn send(&self, name: &str) -> Option<Result<DnsAnswer, LookupError>> {
        let _permit = self.limiter.acquire().await.ok()?;
        if self.cancel.is_cancelled() {
            return None;
        }

        self.notifier.query_dispatched();
        Some(
            self.client
                .query(name, self.options.record_type, self.options.class)
                .await,
        )
    }
}

/// Receiving end of a running bulk lookup.
///
/// Dropping the handle cancels the lookup: nothing new is sent and the events of
/// queries still in flight are discarded.
pub struct LookupHandle {
    events: mpsc::UnboundedReceiver<LookupEvent>,
    cancel: CancellationToken,
}

impl LookupHandle {
    /// Next event, or `None` once the stream is closed after `Complete`.
    pub async fn next(&mut self) -> Option<LookupEvent> {
        self.events.recv().await
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Drains every event up to and including `Complete`.
    pub async fn collect(mut self) -> Vec<LookupEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.events.recv().await {
            let done = event.is_complete();
            events.push(event);
            if done {
                break;
            }
        }
        events
    }
}

impl Drop for LookupHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
