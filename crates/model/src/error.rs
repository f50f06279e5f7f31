use thiserror::Error;

/// Errors raised while constructing or validating model values.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A scalar preference fell outside its allowed range.
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Field name as it appears in the stored document.
        field: &'static str,
        /// Offending value, rendered for display.
        value: String,
        /// Inclusive lower bound.
        min: String,
        /// Inclusive upper bound.
        max: String,
    },

    /// A label that is not one of the five known moods.
    #[error("invalid mood label '{0}', expected one of: happy, tired, adventurous, relaxed, social")]
    InvalidMood(String),

    /// A rating outside 1-5.
    #[error("rating must be between 1 and 5 (got {0})")]
    InvalidRating(i64),
}
