use std::net::IpAddr;

/// Read-only view of the host's resolver configuration.
///
/// Only used to enumerate default servers and the local domain suffix; never queried
/// for records.
pub trait SystemResolverConfig: Send + Sync {
    /// Configured name servers, in system order.
    fn name_servers(&self) -> Vec<IpAddr>;

    /// Local domain suffix appended to single-label names, if any.
    fn domain_suffix(&self) -> Option<String>;
}
