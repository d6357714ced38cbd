mod lookup_notifier;
mod query_name_builder;
mod record_demultiplexer;
mod server_list_resolver;

pub use lookup_notifier::LookupNotifier;
pub use query_name_builder::{enum_name, reverse_name, QueryName, QueryNameBuilder};
pub use record_demultiplexer::RecordDemultiplexer;
pub use server_list_resolver::ServerListResolver;
