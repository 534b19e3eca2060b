//! dnsguard Domain Layer
pub mod config;
pub mod errors;
pub mod filter_request;
pub mod policy;
pub mod verdict;
mod wire;

pub use config::{CliOverrides, Config, ConfigError, DaemonConfig, LoggingConfig, PolicyConfig};
pub use errors::DomainError;
pub use filter_request::{FilterOutcome, FilterRequest, QueryClass, RecordType};
pub use policy::{Policy, PolicyDocument, PolicyRule, PolicySnapshot};
pub use verdict::{Category, Verdict};
