use ferrous_lookup_application::use_cases::{BulkLookupUseCase, ResolvePtrUseCase};
use ferrous_lookup_infrastructure::dns::HickoryClientFactory;
use ferrous_lookup_infrastructure::system::SystemResolver;
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub bulk_lookup: BulkLookupUseCase,
    pub reverse_lookup: ResolvePtrUseCase,
}

impl UseCases {
    pub fn new() -> Self {
        let system = Arc::new(SystemResolver::load());
        let clients = Arc::new(HickoryClientFactory::new());

        info!(
            system_servers = system.conf().name_servers.len(),
            "Use cases initialized"
        );

        Self {
            bulk_lookup: BulkLookupUseCase::new(system.clone(), clients.clone()),
            reverse_lookup: ResolvePtrUseCase::new(system, clients),
        }
    }
}

impl Default for UseCases {
    fn default() -> Self {
        Self::new()
    }
}
