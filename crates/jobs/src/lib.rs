pub mod policy_reload;
pub mod runner;

pub use policy_reload::PolicyReloadJob;
pub use runner::JobRunner;
