//! Error types for data validation in barograph-types.

use thiserror::Error;

/// Errors that can occur when constructing reading values.
///
/// Wire decoding never returns these: a malformed frame is classified as
/// [`Decoded::Ignored`](crate::wire::Decoded::Ignored) instead. They only
/// surface from the checked builder path.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A field value failed validation.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias using barograph-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
