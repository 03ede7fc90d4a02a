//! Client-side validation error model.

use thiserror::Error;

/// Result type used by pre-flight validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A pre-flight validation failure.
///
/// These never reach the network: the request is blocked and the `Display`
/// text is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Price must be greater than 0")]
    PriceNotPositive,

    #[error("Code must be at least {min} characters long")]
    CodeTooShort { min: usize },

    #[error("Name must be at least {min} characters long")]
    NameTooShort { min: usize },

    #[error("Description must be at least {min} characters long")]
    DescriptionTooShort { min: usize },

    /// Requested cart quantity below the minimum of one unit.
    #[error("Quantity must be at least 1")]
    QuantityBelowOne,
}

impl ValidationError {
    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::PriceNotPositive => "price_not_positive",
            ValidationError::CodeTooShort { .. } => "code_too_short",
            ValidationError::NameTooShort { .. } => "name_too_short",
            ValidationError::DescriptionTooShort { .. } => "description_too_short",
            ValidationError::QuantityBelowOne => "quantity_below_one",
        }
    }
}
