//! License create/delete output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use sico_api_rs::models::Product;

use crate::commands::create::CreateResult;
use crate::commands::delete::DeleteResult;

use super::helpers::or_dash;

/// JSON output structure for a created license.
#[derive(Serialize)]
pub struct CreatedLicenseOutput<'a> {
    pub product: Product,
    pub neuron_id: &'a str,
    pub project_name: &'a str,
    pub is_new_license: bool,
    pub password: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub premium_password: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub modem_password: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub ip_address: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub wireguard_address: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub server_name: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    pub info: &'a str,
}

fn is_empty(value: &&str) -> bool {
    value.is_empty()
}

/// Formats a created license as JSON.
pub fn format_created_license(result: &CreateResult) -> Result<String, serde_json::Error> {
    let response = &result.response;
    let network = result.product.is_network();

    let output = CreatedLicenseOutput {
        product: result.product,
        neuron_id: &result.neuron_id,
        project_name: &result.project_name,
        is_new_license: response.is_new_license,
        password: &response.password,
        premium_password: &response.premium_password,
        modem_password: if network { "" } else { response.modem_password.as_str() },
        ip_address: if network { response.ip_address() } else { "" },
        wireguard_address: if network { response.wireguard_address() } else { "" },
        server_name: &response.server_name,
        info: &response.info,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a created license for the terminal.
pub fn format_created_license_table(result: &CreateResult, use_colors: bool) -> String {
    let response = &result.response;
    let mut output = String::new();

    let verb = if response.is_new_license {
        "Created"
    } else {
        "Regenerated"
    };
    let title = format!(
        "{} {} license for {} ({})",
        verb,
        result.product.label(),
        result.project_name,
        result.neuron_id
    );
    if use_colors {
        output.push_str(&format!("{}\n\n", title.green()));
    } else {
        output.push_str(&format!("{}\n\n", title));
    }

    let mut fields = vec![("Password", response.password.as_str())];
    if result.product.shows_premium() {
        fields.push(("Premium", response.premium_password.as_str()));
    }
    if result.product.is_network() {
        fields.push(("IP", response.ip_address()));
        fields.push(("Wireguard", response.wireguard_address()));
    } else {
        fields.push(("Modem PW", response.modem_password.as_str()));
    }
    if !response.server_name.is_empty() {
        fields.push(("Server", response.server_name.as_str()));
    }

    for (name, value) in fields {
        output.push_str(&format!("  {:<10} {}\n", format!("{name}:"), or_dash(Some(value))));
    }

    if !response.info.trim().is_empty() {
        output.push_str(&format!("\n{}\n", response.info.trim()));
    }

    output
}

/// JSON output structure for a deleted license.
#[derive(Serialize)]
pub struct DeletedLicenseOutput<'a> {
    pub product: Product,
    pub neuron_id: &'a str,
    pub project_name: &'a str,
    pub status: &'static str,
    pub message: &'a str,
}

/// Formats a deleted license as JSON.
pub fn format_deleted_license(result: &DeleteResult) -> Result<String, serde_json::Error> {
    let output = DeletedLicenseOutput {
        product: result.product,
        neuron_id: &result.neuron_id,
        project_name: &result.project_name,
        status: "deleted",
        message: &result.message,
    };

    serde_json::to_string_pretty(&output)
}
