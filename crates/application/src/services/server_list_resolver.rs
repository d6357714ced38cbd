use ferrous_lookup_domain::{LookupOptions, ServerEndpoint};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::SystemResolverConfig;

/// Computes the ordered server list for one call.
#[derive(Clone)]
pub struct ServerListResolver {
    system: Arc<dyn SystemResolverConfig>,
}

impl ServerListResolver {
    pub fn new(system: Arc<dyn SystemResolverConfig>) -> Self {
        Self { system }
    }

    /// Never fails; an empty list simply means nothing will be queried.
    pub fn resolve(&self, options: &LookupOptions) -> Vec<ServerEndpoint> {
        let servers: Vec<ServerEndpoint> = if options.use_custom_dns_server {
            options
                .custom_dns_servers
                .iter()
                .filter_map(|server| match parse_server_address(server) {
                    Some(address) => Some(ServerEndpoint::new(address, options.port)),
                    None => {
                        warn!(server = %server, "Ignoring custom DNS server that is not an IP address");
                        None
                    }
                })
                .collect()
        } else {
            self.system
                .name_servers()
                .into_iter()
                .filter(|address| {
                    let site_local = ServerEndpoint::is_site_local_address(address);
                    if site_local {
                        debug!(server = %address, "Skipping IPv6 site-local resolver");
                    }
                    !site_local
                })
                .map(ServerEndpoint::with_default_port)
                .collect()
        };

        debug!(
            custom = options.use_custom_dns_server,
            servers = servers.len(),
            "Server list resolved"
        );
        servers
    }
}

fn parse_server_address(server: &str) -> Option<IpAddr> {
    let trimmed = server.trim();
    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    unbracketed.parse().ok()
}
