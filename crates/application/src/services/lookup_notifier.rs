use ferrous_lookup_domain::{LookupError, LookupEvent, LookupSummary, ResolvedRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Default)]
struct Counters {
    queries: AtomicUsize,
    records: AtomicUsize,
    errors: AtomicUsize,
}

/// Sending side of a bulk lookup stream.
///
/// Clones are handed to per-server workers; `complete` consumes the coordinator's
/// copy once every worker has returned, so `Complete` is always the last event.
/// Events sent after the receiver is gone are dropped.
#[derive(Clone)]
pub struct LookupNotifier {
    sender: mpsc::UnboundedSender<LookupEvent>,
    counters: Arc<Counters>,
}

impl LookupNotifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<LookupEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let notifier = Self {
            sender: tx,
            counters: Arc::new(Counters::default()),
        };
        (notifier, rx)
    }

    pub fn query_dispatched(&self) {
        self.counters.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record(&self, record: ResolvedRecord) {
        self.counters.records.fetch_add(1, Ordering::Relaxed);
        self.emit(LookupEvent::Record(record));
    }

    pub fn records(&self, records: Vec<ResolvedRecord>) {
        for record in records {
            self.record(record);
        }
    }

    pub fn error(&self, error: LookupError) {
        self.counters.errors.fetch_add(1, Ordering::Relaxed);
        self.emit(LookupEvent::Error(error));
    }

    pub fn complete(self, hosts: usize, servers: usize, cancelled: bool) -> LookupSummary {
        let summary = LookupSummary {
            hosts,
            servers,
            queries: self.counters.queries.load(Ordering::Relaxed),
            records: self.counters.records.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
            cancelled,
        };
        self.emit(LookupEvent::Complete(summary.clone()));
        summary
    }

    /// True once the receiving side has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn emit(&self, event: LookupEvent) {
        if self.sender.send(event).is_err() {
            debug!("Lookup receiver dropped, discarding event");
        }
    }
}

impl std::fmt::Debug for LookupNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupNotifier")
            .field("closed", &self.is_closed())
            .finish()
    }
}
