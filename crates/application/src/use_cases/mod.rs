pub mod filter_query;
pub mod reload_policies;

pub use filter_query::FilterQueryUseCase;
pub use reload_policies::ReloadPoliciesUseCase;
