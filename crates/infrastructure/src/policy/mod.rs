pub mod loader;
pub mod store;

pub use loader::{build_snapshot, LoadedPolicies};
pub use store::PolicyStore;
