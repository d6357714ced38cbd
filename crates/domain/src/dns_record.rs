mod record;
mod record_set;
mod record_type;

pub use record::{RecordData, RecordHeader, ResolvedRecord, ResourceRecord};
pub use record_set::RecordSet;
pub use record_type::{DnsClass, RecordType};
