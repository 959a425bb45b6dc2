//! Validation-and-settlement pipeline.
//!
//! This module implements the request lifecycle:
//! - Tokenized and parsed request types
//! - The rejection taxonomy
//! - The ordered validation chain
//! - The pipeline that converts and settles validated requests
//! - Fatal errors for broken collaborator contracts

pub mod error;
pub mod pipeline;
pub mod rejection;
pub mod request;
pub mod validation;

#[cfg(test)]
mod pipeline_props;

pub use error::SettlementError;
pub use pipeline::{Outcome, Settlement, SettlementPipeline};
pub use rejection::RejectionReason;
pub use request::{ConversionRequest, REQUEST_FIELD_COUNT, RawRequest, RequestAmount};
pub use validation::{ValidatedRequest, ValidationChain};
