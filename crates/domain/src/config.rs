pub mod daemon;
pub mod errors;
pub mod logging;
pub mod policy;
pub mod root;

pub use daemon::DaemonConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use policy::PolicyConfig;
pub use root::{CliOverrides, Config};
