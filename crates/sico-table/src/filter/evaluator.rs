//! Evaluation of a [`Classification`] against anlage rows.
//!
//! # Example
//!
//! ```
//! use sico_api_rs::models::Anlage;
//! use sico_table_rs::filter::{classify, FilterEvaluator};
//!
//! let rows = vec![
//!     Anlage {
//!         project_name: Some("Sico Project".to_string()),
//!         release_date: Some("2026-03-15".to_string()),
//!         ..Default::default()
//!     },
//!     Anlage {
//!         project_name: Some("Old".to_string()),
//!         release_date: Some("2025-12-31".to_string()),
//!         ..Default::default()
//!     },
//! ];
//!
//! let classification = classify("2026");
//! let evaluator = FilterEvaluator::new(&classification);
//! let visible = evaluator.filter_rows(&rows);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].project_name.as_deref(), Some("Sico Project"));
//! ```

use chrono::{Datelike, NaiveDateTime};
use sico_api_rs::models::Anlage;

use super::classification::Classification;
use super::date::{end_of_day, format_display_date, parse_row_date, start_of_day};

/// Tests rows against a classified query.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    classification: &'a Classification,
    /// Lowercased free-text term, computed once per evaluator.
    needle: Option<String>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new evaluator for the given classification.
    pub fn new(classification: &'a Classification) -> Self {
        let needle = match classification {
            Classification::FreeText { term } => Some(term.to_lowercase()),
            _ => None,
        };
        Self {
            classification,
            needle,
        }
    }

    /// Returns the classification being evaluated.
    pub fn classification(&self) -> &Classification {
        self.classification
    }

    /// Returns true if the row matches.
    pub fn matches(&self, row: &Anlage) -> bool {
        match self.classification {
            Classification::EmptyQuery => true,
            Classification::DateRange { from, to } => {
                let (start, end) = (start_of_day(*from), end_of_day(*to));
                self.with_release_date(row, |dt| start <= dt && dt <= end)
            }
            Classification::ExactDate { date } => {
                self.with_release_date(row, |dt| dt.date() == *date)
            }
            Classification::YearMatch { year } => {
                self.with_release_date(row, |dt| dt.year() == *year)
            }
            Classification::YearRange { from, to } => {
                self.with_release_date(row, |dt| (*from..=*to).contains(&dt.year()))
            }
            Classification::FreeText { .. } => self.contains_text(row),
        }
    }

    /// Filters a slice of rows, keeping their order.
    pub fn filter_rows<'b>(&self, rows: &'b [Anlage]) -> Vec<&'b Anlage> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }

    /// Applies `predicate` to the row's release date; unparseable dates never match.
    fn with_release_date(&self, row: &Anlage, predicate: impl Fn(NaiveDateTime) -> bool) -> bool {
        row.release_date
            .as_deref()
            .and_then(parse_row_date)
            .is_some_and(predicate)
    }

    fn contains_text(&self, row: &Anlage) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return false;
        };

        let text_fields = [
            row.project_name.as_deref(),
            row.description.as_deref(),
            row.neuron_id.as_deref(),
            row.user_name.as_deref(),
            row.password.as_deref(),
        ];
        let hit = text_fields
            .into_iter()
            .flatten()
            .filter(|value| !value.is_empty())
            .any(|value| value.to_lowercase().contains(needle));

        hit || row
            .release_date
            .as_deref()
            .map(format_display_date)
            .is_some_and(|date| !date.is_empty() && date.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
