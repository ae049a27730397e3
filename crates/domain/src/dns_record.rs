mod record;
mod record_type;

pub use record::{fqdn, ResourceRecord};
pub use record_type::RecordType;
