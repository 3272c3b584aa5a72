//! Human-readable descriptions of a [`Classification`].

use std::fmt;

use super::classification::Classification;
use super::date::DISPLAY_FORMAT;

/// Describes how a query was interpreted, e.g. `year: 2026`.
///
/// Returns an empty string for [`Classification::EmptyQuery`].
pub fn describe(classification: &Classification) -> String {
    classification.to_string()
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::EmptyQuery => Ok(()),
            Classification::DateRange { from, to } => write!(
                f,
                "date range: {} to {}",
                from.format(DISPLAY_FORMAT),
                to.format(DISPLAY_FORMAT)
            ),
            Classification::ExactDate { date } => {
                write!(f, "date: {}", date.format(DISPLAY_FORMAT))
            }
            Classification::YearMatch { year } => write!(f, "year: {year}"),
            Classification::YearRange { from, to } => write!(f, "year range: {from} to {to}"),
            Classification::FreeText { term } => write!(f, "text search: \"{term}\""),
        }
    }
}
