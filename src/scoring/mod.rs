pub mod ladder;
pub mod metric;
pub mod verifier;
