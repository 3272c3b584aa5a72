//! Create command implementation.
//!
//! Issues a license for an anlage. The backend regenerates the passwords when
//! the neuron id already has a license; options left unset are then taken
//! from that anlage.

use sico_api_rs::models::{network_user_name, Anlage, LicenseRequest, LicenseResponse, Product};
use sico_table_rs::LicenseTable;
use tracing::debug;

use super::session::Session;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_created_license, format_created_license_table};

/// Options for the create command.
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub product: Product,
    pub neuron_id: String,
    pub project_name: Option<String>,
    pub description: Option<String>,
    /// Firmware version.
    pub firmware: Option<String>,
    pub premium: bool,
    /// Generate passwords without marking the anlage as licensed.
    pub no_licence: bool,
    /// Wireguard address (network products only).
    pub wireguard: Option<String>,
    /// IP address (network products only).
    pub ip: Option<String>,
}

/// Result of a create command.
#[derive(Debug)]
pub struct CreateResult {
    pub product: Product,
    pub neuron_id: String,
    pub project_name: String,
    pub response: LicenseResponse,
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Fills the options left unset from the anlage that already has the neuron id.
///
/// Given options always win. The premium and licence flags can only be
/// switched on or off respectively, so the anlage decides when they are absent.
pub fn prefill(opts: &CreateOptions, existing: &Anlage) -> CreateOptions {
    let from_row = |value: Option<&str>| value.and_then(non_blank);
    let network = opts.product.is_network();

    CreateOptions {
        product: opts.product,
        neuron_id: opts.neuron_id.clone(),
        project_name: opts
            .project_name
            .clone()
            .or_else(|| from_row(existing.project_name.as_deref())),
        description: opts
            .description
            .clone()
            .or_else(|| from_row(existing.description.as_deref())),
        firmware: opts
            .firmware
            .clone()
            .or_else(|| non_blank(existing.version())),
        premium: opts.premium || existing.is_password3,
        no_licence: opts.no_licence || !existing.has_license,
        wireguard: opts
            .wireguard
            .clone()
            .or_else(|| non_blank(existing.wireguard_address()).filter(|_| network)),
        ip: opts
            .ip
            .clone()
            .or_else(|| non_blank(existing.ip_address()).filter(|_| network)),
    }
}

/// Validates the options and builds the backend request.
pub fn build_request(opts: &CreateOptions, user_name: &str) -> Result<LicenseRequest> {
    let neuron_id = opts.neuron_id.trim();
    if neuron_id.is_empty() {
        return Err(CommandError::Validation("neuron id must not be empty".to_string()));
    }

    let project_name = trimmed(opts.project_name.as_deref());
    if project_name.is_empty() {
        return Err(CommandError::Validation(
            "project name must not be empty".to_string(),
        ));
    }

    let wireguard = trimmed(opts.wireguard.as_deref());
    let ip = trimmed(opts.ip.as_deref());
    let user_name = if opts.product.is_network() {
        network_user_name(user_name, &wireguard, &ip)
    } else if !wireguard.is_empty() || !ip.is_empty() {
        return Err(CommandError::Validation(format!(
            "--wireguard and --ip only apply to network products, not {}",
            opts.product.label()
        )));
    } else {
        user_name.to_string()
    };

    Ok(LicenseRequest {
        neuron_id: neuron_id.to_string(),
        project_name,
        description: trimmed(opts.description.as_deref()),
        version: trimmed(opts.firmware.as_deref()),
        user_name,
        is_premium: opts.premium,
        has_licence: !opts.no_licence,
    })
}

/// Executes the create command.
pub async fn execute(ctx: &CommandContext, opts: &CreateOptions, session: &Session) -> Result<()> {
    let neuron_id = opts.neuron_id.trim();
    if neuron_id.is_empty() {
        return Err(CommandError::Validation("neuron id must not be empty".to_string()));
    }

    let client = ctx.client(session)?;
    let rows = client.get_projects(opts.product, &session.user_name).await?;
    let mut table = LicenseTable::with_rows(opts.product, rows);

    let resolved = match table
        .select_by_neuron_id(neuron_id)
        .then(|| table.selected_row())
        .flatten()
    {
        Some(existing) => {
            debug!(product = %opts.product, neuron_id, "regenerating existing license");
            prefill(opts, existing)
        }
        None => opts.clone(),
    };

    let request = build_request(&resolved, &session.user_name)?;
    debug!(product = %opts.product, neuron_id = %request.neuron_id, "creating license");

    let response = client.create_license(opts.product, &request).await?;

    let result = CreateResult {
        product: opts.product,
        neuron_id: request.neuron_id,
        project_name: request.project_name,
        response,
    };

    if ctx.json_output {
        println!("{}", format_created_license(&result)?);
    } else if !ctx.quiet {
        print!("{}", format_created_license_table(&result, ctx.use_colors));
    }

    Ok(())
}
