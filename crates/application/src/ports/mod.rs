mod classification;
mod policy_store;

pub use classification::ClassificationPort;
pub use policy_store::{PolicyStorePort, ReloadReport};
