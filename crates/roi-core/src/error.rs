//! Error types for the savings calculator.
//!
//! Malformed or out-of-range calculator input never reaches these enums: it is
//! normalized by clamping or defaulting. Errors exist only at the outer seams.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("unknown currency code: {0}")] Unknown(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard unavailable")] Unavailable,
    #[error("clipboard write rejected: {0}")] Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeadError {
    #[error("work email is required")] MissingEmail,
    #[error("invalid email address: {0}")] InvalidEmail(String),
    #[error("a submission is already in flight")] AlreadySubmitting,
    #[error("submission rejected: {0}")] Rejected(String),
    #[error("lead backend unreachable: {0}")] Unreachable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("share failed: {0}")] Share(#[from] ClipboardError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoiError {
    #[error(transparent)] Currency(#[from] CurrencyError),
    #[error(transparent)] Clipboard(#[from] ClipboardError),
    #[error(transparent)] Lead(#[from] LeadError),
    #[error(transparent)] Session(#[from] SessionError),
}
