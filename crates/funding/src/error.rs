//! The module contains the errors the funding core can return.
//!
//! The errors are:
//!
//! - [`NotAuthenticated`] when no donor identity is present.
//! - [`FullyFunded`] when a campaign has no remaining capacity.
//! - [`InvalidAmount`] when an amount fails to parse or is not positive.
//! - [`ExceedsRemaining`] when an amount is larger than the remaining goal;
//!   it carries the exact remaining value so the caller can retry.
//! - [`KeyNotFound`] when a campaign id does not resolve.
//!
//! [`NotAuthenticated`]: FundingError::NotAuthenticated
//! [`FullyFunded`]: FundingError::FullyFunded
//! [`InvalidAmount`]: FundingError::InvalidAmount
//! [`ExceedsRemaining`]: FundingError::ExceedsRemaining
//! [`KeyNotFound`]: FundingError::KeyNotFound

use thiserror::Error;

use crate::Money;

/// Funding core errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FundingError {
    #[error("No donor is signed in")]
    NotAuthenticated,
    #[error("\"{0}\" is already fully funded")]
    FullyFunded(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Amount exceeds remaining goal ({remaining})")]
    ExceedsRemaining { remaining: Money },
    #[error("\"{0}\" key not found")]
    KeyNotFound(String),
}
