//! The anlage (licensed installation) record.

use serde::{Deserialize, Serialize};

/// A licensed installation as returned by `GET /api/projects/{product}`.
///
/// The backend reuses the numbered password slots differently per product:
/// `password3` holds the Wireguard address for network products,
/// `password4` the premium password and `password5` the firmware version.
/// Text fields may be missing or `null` in the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anlage {
    /// Backend row id.
    #[serde(default)]
    pub id: i64,

    /// Project name shown in the first table column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Release date in whatever notation the backend emits (usually ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Device identifier the license is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neuron_id: Option<String>,

    /// Primary license password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Modem password, or the IP address for network products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modem_password: Option<String>,

    #[serde(default)]
    pub is_modem_password: bool,

    #[serde(default)]
    pub has_license: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password3: Option<String>,

    #[serde(default)]
    pub is_password3: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password4: Option<String>,

    #[serde(default)]
    pub is_password4: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password5: Option<String>,

    #[serde(default)]
    pub is_password5: bool,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owner of the license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl Anlage {
    /// Returns the premium password (`password4`).
    pub fn premium_password(&self) -> &str {
        self.password4.as_deref().unwrap_or_default()
    }

    /// Returns the IP address of a network product.
    ///
    /// The modem password slot carries the IP address; pipe-separated legacy
    /// values are not addresses and yield an empty string.
    pub fn ip_address(&self) -> &str {
        match self.modem_password.as_deref() {
            Some(mp) if !mp.contains('|') => mp,
            _ => "",
        }
    }

    /// Returns the Wireguard address of a network product (`password3`).
    pub fn wireguard_address(&self) -> &str {
        self.password3.as_deref().unwrap_or_default()
    }

    /// Returns the firmware version the license was issued for (`password5`).
    pub fn version(&self) -> &str {
        self.password5.as_deref().unwrap_or_default()
    }
}
