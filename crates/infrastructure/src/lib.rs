pub mod classification;
pub mod policy;

pub use classification::DaemonClient;
pub use policy::PolicyStore;
