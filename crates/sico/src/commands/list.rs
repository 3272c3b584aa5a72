//! List command implementation.
//!
//! Fetches the anlagen of one product and narrows them with the smart filter
//! (`--filter`) or a release date range (`--from`/`--to`).

use sico_api_rs::models::Product;
use sico_table_rs::LicenseTable;
use tracing::debug;

use super::session::Session;
use super::{CommandContext, Result};
use crate::output::{format_anlagen_json, format_anlagen_table};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    pub product: Product,
    /// Smart filter query.
    pub filter: Option<String>,
    /// Start of a date range (dd.mm.yyyy).
    pub from: Option<String>,
    /// End of a date range (dd.mm.yyyy).
    pub to: Option<String>,
}

impl ListOptions {
    /// Applies the filter options to a table.
    ///
    /// `--filter` and `--from`/`--to` are mutually exclusive on the command
    /// line; a filter wins if both are somehow set.
    pub fn apply(&self, table: &mut LicenseTable) {
        if let Some(filter) = &self.filter {
            table.set_query(filter.as_str());
        } else if self.from.is_some() || self.to.is_some() {
            table.apply_date_range(self.from.as_deref(), self.to.as_deref());
        }
    }
}

/// Executes the list command.
pub async fn execute(ctx: &CommandContext, opts: &ListOptions, session: &Session) -> Result<()> {
    let client = ctx.client(session)?;
    let rows = client.get_projects(opts.product, &session.user_name).await?;
    debug!(product = %opts.product, rows = rows.len(), "fetched anlagen");

    let mut table = LicenseTable::with_rows(opts.product, rows);
    opts.apply(&mut table);

    if ctx.json_output {
        println!("{}", format_anlagen_json(&table)?);
    } else if !ctx.quiet {
        print!("{}", format_anlagen_table(&table, ctx.use_colors));
    }

    Ok(())
}
