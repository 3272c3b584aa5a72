//! Smart filter for the license table.
//!
//! A single free-text query is classified into one of several intents and
//! then evaluated against every row. The same [`Classification`] drives both
//! the row predicate and the label shown next to the table, so the two can
//! never disagree.
//!
//! # Supported Syntax
//!
//! Rules are tried in this order; the first one that fits wins.
//!
//! - `dd.mm.yyyy - dd.mm.yyyy` - Release date within the range, both days inclusive
//! - `dd.mm.yyyy` - Release date on that day
//! - `yyyy` - Release year (1990 to 2100)
//! - `yyyy - yyyy` - Release year within the range
//! - anything else - Case-insensitive text search over project name,
//!   description, neuron id, user name, password and the formatted release date
//!
//! Day and month may have one or two digits. A date that does not exist
//! (such as `31.02.2025`) is not an error; the query falls through to the next
//! rule and usually ends up as a text search.
//!
//! # Example
//!
//! ```
//! use sico_table_rs::filter::{classify, describe, Classification, FilterEvaluator};
//!
//! let classification = classify("01.01.2025 - 30.06.2025");
//! assert!(matches!(classification, Classification::DateRange { .. }));
//! assert_eq!(describe(&classification), "date range: 01.01.2025 to 30.06.2025");
//!
//! let evaluator = FilterEvaluator::new(&classification);
//! let rows: Vec<sico_api_rs::models::Anlage> = vec![];
//! assert!(evaluator.filter_rows(&rows).is_empty());
//! ```

mod classification;
mod date;
mod error;
mod evaluator;
mod label;

pub use classification::{classify, compose_date_range_query, Classification, MAX_YEAR, MIN_YEAR};
pub use date::{format_display_date, parse_date, parse_row_date, DISPLAY_FORMAT};
pub use error::{DateError, FilterResult};
pub use evaluator::FilterEvaluator;
pub use label::describe;

#[cfg(test)]
mod tests;
