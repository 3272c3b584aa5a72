//! Error types for query date parsing.

use thiserror::Error;

/// A specialized Result type for strict date parsing.
pub type FilterResult<T> = Result<T, DateError>;

/// Why a query fragment is not a `dd.mm.yyyy` date.
///
/// These never escape classification: a rule whose date fails to parse
/// simply does not match and the next rule is tried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// The text does not have the `D.M.YYYY` shape.
    #[error("not a dd.mm.yyyy date: {text}")]
    Malformed {
        /// The rejected text.
        text: String,
    },

    /// The shape is right but the day does not exist (e.g. 31.02.2025).
    #[error("no such calendar day: {day:02}.{month:02}.{year:04}")]
    InvalidCalendarDate {
        /// Day of month as written.
        day: u32,
        /// Month as written.
        month: u32,
        /// Year as written.
        year: i32,
    },
}

impl DateError {
    /// Creates a malformed date error.
    pub fn malformed(text: impl Into<String>) -> Self {
        DateError::Malformed { text: text.into() }
    }
}
