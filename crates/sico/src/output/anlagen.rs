//! Anlage list output formatting.
//!
//! Each product line shows its own column set: network products carry IP and
//! Wireguard addresses, Sico1010 has no premium password.

use owo_colors::OwoColorize;
use serde::Serialize;
use sico_api_rs::models::{Anlage, Product};
use sico_table_rs::filter::{format_display_date, Classification};
use sico_table_rs::LicenseTable;

use super::helpers::{cell, format_flag, or_dash};

/// A table column: header, width and how to read the cell from a row.
struct Column {
    header: &'static str,
    width: usize,
    value: fn(&Anlage) -> String,
}

fn project_name(a: &Anlage) -> String {
    or_dash(a.project_name.as_deref()).to_string()
}

fn description(a: &Anlage) -> String {
    or_dash(a.description.as_deref()).to_string()
}

fn release_date(a: &Anlage) -> String {
    let formatted = format_display_date(a.release_date.as_deref().unwrap_or_default());
    or_dash(Some(&formatted)).to_string()
}

fn neuron_id(a: &Anlage) -> String {
    or_dash(a.neuron_id.as_deref()).to_string()
}

fn password(a: &Anlage) -> String {
    or_dash(a.password.as_deref()).to_string()
}

fn modem_password(a: &Anlage) -> String {
    or_dash(a.modem_password.as_deref()).to_string()
}

fn premium_password(a: &Anlage) -> String {
    or_dash(Some(a.premium_password())).to_string()
}

fn ip_address(a: &Anlage) -> String {
    or_dash(Some(a.ip_address())).to_string()
}

fn wireguard_address(a: &Anlage) -> String {
    or_dash(Some(a.wireguard_address())).to_string()
}

fn licensed(a: &Anlage) -> String {
    format_flag(a.has_license).to_string()
}

fn user_name(a: &Anlage) -> String {
    or_dash(a.user_name.as_deref()).to_string()
}

const PROJECT: Column = Column { header: "Project", width: 22, value: project_name };
const DESCRIPTION: Column = Column { header: "Description", width: 22, value: description };
const RELEASED: Column = Column { header: "Released", width: 10, value: release_date };
const NEURON_ID: Column = Column { header: "Neuron ID", width: 14, value: neuron_id };
const PASSWORD: Column = Column { header: "Password", width: 12, value: password };
const MODEM_PASSWORD: Column = Column { header: "Modem PW", width: 12, value: modem_password };
const PREMIUM: Column = Column { header: "Premium", width: 12, value: premium_password };
const IP: Column = Column { header: "IP", width: 15, value: ip_address };
const WIREGUARD: Column = Column { header: "Wireguard", width: 15, value: wireguard_address };
const LICENSED: Column = Column { header: "Lic", width: 3, value: licensed };
const USER: Column = Column { header: "User", width: 12, value: user_name };

/// Returns the columns shown for a product.
fn columns(product: Product) -> Vec<Column> {
    let mut columns = vec![PROJECT, DESCRIPTION, RELEASED, NEURON_ID, PASSWORD];
    if product.shows_premium() {
        columns.push(PREMIUM);
    }
    if product.is_network() {
        columns.extend([IP, WIREGUARD]);
    } else {
        columns.push(MODEM_PASSWORD);
    }
    columns.extend([LICENSED, USER]);
    columns
}

fn format_line(cells: impl Iterator<Item = String>) -> String {
    let mut line = cells.collect::<Vec<_>>().join(" ");
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

/// Formats the visible rows of a table with a filter summary line.
pub fn format_anlagen_table(table: &LicenseTable, use_colors: bool) -> String {
    let mut output = String::new();

    let summary = if table.is_filtered() {
        format!(
            "{}: {} ({} of {})",
            table.product().label(),
            table.active_filter_label(),
            table.visible_count(),
            table.rows().len()
        )
    } else {
        format!("{}: {} anlagen", table.product().label(), table.rows().len())
    };
    if use_colors {
        output.push_str(&format!("{}\n\n", summary.bold()));
    } else {
        output.push_str(&summary);
        output.push_str("\n\n");
    }

    let rows = table.visible_rows();
    if rows.is_empty() {
        output.push_str("No anlagen found.\n");
        return output;
    }

    let columns = columns(table.product());

    let header = format_line(columns.iter().map(|c| cell(c.header, c.width)));
    if use_colors {
        output.push_str(&format!("{}", header.dimmed()));
    } else {
        output.push_str(&header);
    }

    for row in rows {
        output.push_str(&format_line(
            columns.iter().map(|c| cell(&(c.value)(row), c.width)),
        ));
    }

    output
}

/// JSON output structure for the active filter.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub query: &'a str,
    pub label: String,
    #[serde(flatten)]
    pub classification: &'a Classification,
}

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct AnlagenListOutput<'a> {
    pub product: Product,
    pub filter: FilterOutput<'a>,
    pub total: usize,
    pub count: usize,
    pub anlagen: Vec<&'a Anlage>,
}

/// Formats the visible rows of a table as JSON.
pub fn format_anlagen_json(table: &LicenseTable) -> Result<String, serde_json::Error> {
    let anlagen = table.visible_rows();
    let output = AnlagenListOutput {
        product: table.product(),
        filter: FilterOutput {
            query: table.query(),
            label: table.active_filter_label(),
            classification: table.classification(),
        },
        total: table.rows().len(),
        count: anlagen.len(),
        anlagen,
    };

    serde_json::to_string_pretty(&output)
}
