//! License creation and deletion payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/licenses/{product}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRequest {
    pub neuron_id: String,
    pub project_name: String,
    pub description: String,
    pub version: String,
    /// For network products this is `user|wireguard|ip`, see [`network_user_name`].
    pub user_name: String,
    pub is_premium: bool,
    /// Spelled `hasLicence` on the wire.
    pub has_licence: bool,
}

/// Response of a license creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseResponse {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub premium_password: String,
    /// Modem password, or `IP|Wireguard` for network products.
    #[serde(default)]
    pub modem_password: String,
    #[serde(default)]
    pub premium_modem_password: String,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub is_new_license: bool,
}

impl LicenseResponse {
    /// Returns the IP address part of `modem_password`.
    pub fn ip_address(&self) -> &str {
        match self.modem_password.split_once('|') {
            Some((ip, _)) => ip,
            None => &self.modem_password,
        }
    }

    /// Returns the Wireguard address part of `modem_password`, if any.
    pub fn wireguard_address(&self) -> &str {
        match self.modem_password.split('|').nth(1) {
            Some(wireguard) => wireguard,
            None => "",
        }
    }
}

/// Body of `POST /api/licenses/{product}/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub neuron_id: String,
    pub user_name: String,
}

/// Response of a license deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Builds the user name sent with network product licenses.
///
/// The backend expects `user|wireguard|ip` when either address is given and
/// the plain user name otherwise.
pub fn network_user_name(user_name: &str, wireguard: &str, ip: &str) -> String {
    if wireguard.is_empty() && ip.is_empty() {
        user_name.to_string()
    } else {
        format!("{user_name}|{wireguard}|{ip}")
    }
}
