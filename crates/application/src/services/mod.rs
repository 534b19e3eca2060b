pub mod decision_engine;

pub use decision_engine::{decide, Decision};
