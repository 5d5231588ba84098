pub mod export;

pub use export::{render, sort_results};
