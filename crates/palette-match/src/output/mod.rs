//! Output types for the analysis pipeline.

mod match_result;

pub use match_result::MatchResult;
