//! Query classification.
//!
//! A raw filter string is run through an ordered list of rules. Each rule
//! either recognises the query and returns a [`Classification`], or declines
//! and lets the next rule try. Free text is the fallback, so classification
//! is total.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use super::date::{is_digits, parse_date};

/// Earliest year accepted by the year rules.
pub const MIN_YEAR: i32 = 1990;

/// Latest year accepted by the year rules.
pub const MAX_YEAR: i32 = 2100;

/// The interpretation chosen for a filter query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// Blank query; every row matches.
    EmptyQuery,

    /// `dd.mm.yyyy - dd.mm.yyyy`, inclusive of both whole days.
    DateRange { from: NaiveDate, to: NaiveDate },

    /// `dd.mm.yyyy`
    ExactDate { date: NaiveDate },

    /// A four digit year within [`MIN_YEAR`]..=[`MAX_YEAR`].
    YearMatch { year: i32 },

    /// `yyyy - yyyy`
    ///
    /// Only `from >= MIN_YEAR` and `to <= MAX_YEAR` are checked; `from > to`
    /// is accepted and simply matches nothing.
    YearRange { from: i32, to: i32 },

    /// Case-insensitive substring search. The term is trimmed but keeps its case.
    FreeText { term: String },
}

impl Classification {
    /// Returns true for the date-based variants, which need a parseable
    /// release date to match.
    pub fn is_date_based(&self) -> bool {
        matches!(
            self,
            Classification::DateRange { .. }
                | Classification::ExactDate { .. }
                | Classification::YearMatch { .. }
                | Classification::YearRange { .. }
        )
    }

    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Classification::EmptyQuery => "empty_query",
            Classification::DateRange { .. } => "date_range",
            Classification::ExactDate { .. } => "exact_date",
            Classification::YearMatch { .. } => "year_match",
            Classification::YearRange { .. } => "year_range",
            Classification::FreeText { .. } => "free_text",
        }
    }
}

/// A classification rule. Receives the trimmed, non-empty query.
type Rule = fn(&str) -> Option<Classification>;

/// Rules in priority order; the first match wins.
const RULES: [Rule; 4] = [try_date_range, try_exact_date, try_year, try_year_range];

/// Classifies a raw filter query.
///
/// Never fails: anything that is not a valid date, date range, year or year
/// range becomes [`Classification::FreeText`].
///
/// # Examples
///
/// ```
/// use sico_table_rs::filter::{classify, Classification};
///
/// assert_eq!(classify("  "), Classification::EmptyQuery);
/// assert_eq!(classify("2026"), Classification::YearMatch { year: 2026 });
/// assert_eq!(
///     classify("31.02.2025"),
///     Classification::FreeText { term: "31.02.2025".to_string() }
/// );
/// ```
pub fn classify(query: &str) -> Classification {
    let query = query.trim();
    if query.is_empty() {
        return Classification::EmptyQuery;
    }

    RULES
        .iter()
        .find_map(|rule| rule(query))
        .unwrap_or_else(|| Classification::FreeText {
            term: query.to_string(),
        })
}

/// Splits `a - b` at its single hyphen and trims both halves.
fn split_range(query: &str) -> Option<(&str, &str)> {
    let (left, right) = query.split_once('-')?;
    if right.contains('-') {
        return None;
    }
    Some((left.trim(), right.trim()))
}

/// Parses a query date, logging calendar rejections.
fn query_date(text: &str) -> Option<NaiveDate> {
    parse_date(text)
        .inspect_err(|err| trace!(%err, "rejected query date"))
        .ok()
}

fn try_date_range(query: &str) -> Option<Classification> {
    let (from, to) = split_range(query)?;
    Some(Classification::DateRange {
        from: query_date(from)?,
        to: query_date(to)?,
    })
}

fn try_exact_date(query: &str) -> Option<Classification> {
    query_date(query).map(|date| Classification::ExactDate { date })
}

fn four_digit_year(text: &str) -> Option<i32> {
    if is_digits(text, 4..=4) {
        text.parse().ok()
    } else {
        None
    }
}

fn try_year(query: &str) -> Option<Classification> {
    let year = four_digit_year(query)?;
    (MIN_YEAR..=MAX_YEAR)
        .contains(&year)
        .then_some(Classification::YearMatch { year })
}

fn try_year_range(query: &str) -> Option<Classification> {
    let (from, to) = split_range(query)?;
    let from = four_digit_year(from)?;
    let to = four_digit_year(to)?;
    (from >= MIN_YEAR && to <= MAX_YEAR).then_some(Classification::YearRange { from, to })
}

/// Builds a filter query from the two ends of a date picker.
///
/// Both ends give `"from - to"`, one end gives just that date, and neither
/// gives an empty query. Blank inputs count as missing.
pub fn compose_date_range_query(from: Option<&str>, to: Option<&str>) -> String {
    let from = from.map(str::trim).filter(|s| !s.is_empty());
    let to = to.map(str::trim).filter(|s| !s.is_empty());

    match (from, to) {
        (Some(from), Some(to)) => format!("{from} - {to}"),
        (Some(date), None) | (None, Some(date)) => date.to_string(),
        (None, None) => String::new(),
    }
}
