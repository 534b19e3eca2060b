pub mod daemon_mock;
pub mod policy_files;

#[allow(unused_imports)]
pub use daemon_mock::{DaemonBehavior, MockDaemon};
#[allow(unused_imports)]
pub use policy_files::{customer_json, write_file};
