//! License table view for Sico anlagen.
//!
//! [`LicenseTable`] holds the rows of one product together with the current
//! filter query, and keeps the list of visible rows up to date whenever
//! either changes. The query language itself lives in [`filter`].

pub mod filter;

use sico_api_rs::models::{Anlage, Product};
use tracing::debug;

use filter::{classify, compose_date_range_query, describe, Classification, FilterEvaluator};

/// Rows of one product plus the active filter and selection.
///
/// Rows are never modified; filtering only changes which of them are visible.
#[derive(Debug, Clone)]
pub struct LicenseTable {
    product: Product,
    rows: Vec<Anlage>,
    query: String,
    classification: Classification,
    /// Indices into `rows` that pass the filter, in row order.
    visible: Vec<usize>,
    /// Neuron id of the selected row.
    selected: Option<String>,
}

impl LicenseTable {
    /// Creates an empty table for a product.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            rows: Vec::new(),
            query: String::new(),
            classification: Classification::EmptyQuery,
            visible: Vec::new(),
            selected: None,
        }
    }

    /// Creates a table already filled with rows.
    pub fn with_rows(product: Product, rows: Vec<Anlage>) -> Self {
        let mut table = Self::new(product);
        table.set_rows(rows);
        table
    }

    /// Returns the product this table shows.
    pub fn product(&self) -> Product {
        self.product
    }

    /// Returns all rows, filtered or not.
    pub fn rows(&self) -> &[Anlage] {
        &self.rows
    }

    /// Returns the raw query as last set.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the interpretation of the current query.
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Replaces the rows and re-applies the current filter.
    pub fn set_rows(&mut self, rows: Vec<Anlage>) {
        self.rows = rows;
        self.refresh();
    }

    /// Sets the filter query and re-evaluates it against every row.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.classification = classify(&self.query);
        debug!(
            product = %self.product,
            kind = self.classification.kind(),
            label = %self.classification,
            "filter query classified"
        );
        self.refresh();
    }

    /// Sets the query from the two ends of a date picker.
    ///
    /// Either end may be missing; with both missing the filter is cleared.
    pub fn apply_date_range(&mut self, from: Option<&str>, to: Option<&str>) {
        self.set_query(compose_date_range_query(from, to));
    }

    /// Clears the filter so that every row is visible.
    pub fn clear_filter(&mut self) {
        self.set_query(String::new());
    }

    /// Returns the rows passing the filter, in their original order.
    pub fn visible_rows(&self) -> Vec<&Anlage> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Returns how many rows pass the filter.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Returns true if a non-empty filter is active.
    pub fn is_filtered(&self) -> bool {
        self.classification != Classification::EmptyQuery
    }

    /// Describes the active filter; empty when nothing is filtered.
    pub fn active_filter_label(&self) -> String {
        describe(&self.classification)
    }

    /// Finds a row by neuron id, visible or not.
    pub fn find_by_neuron_id(&self, neuron_id: &str) -> Option<&Anlage> {
        let neuron_id = neuron_id.trim();
        self.rows
            .iter()
            .find(|row| row.neuron_id.as_deref() == Some(neuron_id))
    }

    /// Selects the visible row with the given neuron id.
    ///
    /// Returns false and leaves the selection unchanged if no visible row has
    /// that id.
    pub fn select_by_neuron_id(&mut self, neuron_id: &str) -> bool {
        let neuron_id = neuron_id.trim();
        let found = self
            .visible_rows()
            .iter()
            .any(|row| row.neuron_id.as_deref() == Some(neuron_id));
        if found {
            self.selected = Some(neuron_id.to_string());
        }
        found
    }

    /// Returns the selected row, if it is still visible.
    pub fn selected_row(&self) -> Option<&Anlage> {
        let selected = self.selected.as_deref()?;
        self.visible
            .iter()
            .map(|&i| &self.rows[i])
            .find(|row| row.neuron_id.as_deref() == Some(selected))
    }

    /// Drops the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Recomputes the visible rows and drops a selection that became hidden.
    fn refresh(&mut self) {
        let evaluator = FilterEvaluator::new(&self.classification);
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| evaluator.matches(row))
            .map(|(i, _)| i)
            .collect();

        if self.selected.is_some() && self.selected_row().is_none() {
            debug!("selected row no longer visible, clearing selection");
            self.selected = None;
        }

        debug!(
            product = %self.product,
            visible = self.visible.len(),
            total = self.rows.len(),
            "license table refreshed"
        );
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
