//! rootwalk domain layer
pub mod config;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ResolverConfig};
pub use dns_record::{fqdn, RecordType, ResourceRecord};
pub use errors::DomainError;
