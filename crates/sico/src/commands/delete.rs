//! Delete command implementation.
//!
//! Looks the anlage up by neuron id, asks for confirmation and deletes its
//! license on the backend.

use sico_api_rs::models::{DeleteRequest, Product};
use sico_table_rs::LicenseTable;
use tracing::debug;

use super::session::Session;
use super::{confirm_operation, CommandContext, CommandError, ConfirmResult, Result};
use crate::output::format_deleted_license;

/// Options for the delete command.
#[derive(Debug)]
pub struct DeleteOptions {
    pub product: Product,
    pub neuron_id: String,
    /// Skip confirmation prompt.
    pub force: bool,
}

/// Result of a delete command.
#[derive(Debug)]
pub struct DeleteResult {
    pub product: Product,
    pub neuron_id: String,
    pub project_name: String,
    /// Message returned by the backend.
    pub message: String,
}

/// Executes the delete command.
pub async fn execute(ctx: &CommandContext, opts: &DeleteOptions, session: &Session) -> Result<()> {
    let neuron_id = opts.neuron_id.trim();
    if neuron_id.is_empty() {
        return Err(CommandError::Validation("neuron id must not be empty".to_string()));
    }

    let client = ctx.client(session)?;
    let rows = client.get_projects(opts.product, &session.user_name).await?;
    let table = LicenseTable::with_rows(opts.product, rows);

    let anlage = table.find_by_neuron_id(neuron_id).ok_or_else(|| {
        CommandError::NotFound(format!(
            "no {} anlage with neuron id '{}'",
            opts.product.label(),
            neuron_id
        ))
    })?;
    let project_name = anlage.project_name.clone().unwrap_or_default();

    let prompt = format!(
        "Delete the {} license of '{}' ({})?",
        opts.product.label(),
        project_name,
        neuron_id
    );
    if confirm_operation(&prompt, opts.force)? == ConfirmResult::Aborted {
        if !ctx.quiet {
            eprintln!("Aborted.");
        }
        return Ok(());
    }

    let request = DeleteRequest {
        neuron_id: neuron_id.to_string(),
        user_name: session.user_name.clone(),
    };
    debug!(product = %opts.product, neuron_id, "deleting license");
    let response = client.delete_license(opts.product, &request).await?;

    if !response.success {
        let message = if response.message.is_empty() {
            "the backend refused to delete the license".to_string()
        } else {
            response.message
        };
        return Err(CommandError::Validation(message));
    }

    let result = DeleteResult {
        product: opts.product,
        neuron_id: neuron_id.to_string(),
        project_name,
        message: response.message,
    };

    if ctx.json_output {
        println!("{}", format_deleted_license(&result)?);
    } else if !ctx.quiet {
        if result.message.is_empty() {
            println!("Deleted license of {} ({})", result.project_name, result.neuron_id);
        } else {
            println!("{}", result.message);
        }
    }

    Ok(())
}
