pub mod config;
pub mod store;
pub mod engines;
pub mod scoring;
pub mod report;
pub mod monitor;
pub mod api {
    pub mod server;
}

pub use crate::scoring::ladder::ThresholdLadder;
pub use crate::scoring::verifier::{VerificationReport, Verifier};
pub use crate::store::error::StoreError;
