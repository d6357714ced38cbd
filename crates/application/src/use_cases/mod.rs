mod bulk_lookup;
mod reverse_lookup;

pub use bulk_lookup::{BulkLookupUseCase, LookupHandle};
pub use reverse_lookup::ResolvePtrUseCase;
