//! The four Sico product lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A Sico product line. Each product has its own license table on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Sico1010,
    Sico2020,
    Sico5000,
    Sico6000,
}

impl Product {
    /// All products in dashboard order.
    pub const ALL: [Product; 4] = [
        Product::Sico6000,
        Product::Sico2020,
        Product::Sico1010,
        Product::Sico5000,
    ];

    /// Returns the path segment used by the backend (e.g. `sico2020`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::Sico1010 => "sico1010",
            Product::Sico2020 => "sico2020",
            Product::Sico5000 => "sico5000",
            Product::Sico6000 => "sico6000",
        }
    }

    /// Returns the display name (e.g. `Sico2020`).
    pub fn label(&self) -> &'static str {
        match self {
            Product::Sico1010 => "Sico1010",
            Product::Sico2020 => "Sico2020",
            Product::Sico5000 => "Sico5000",
            Product::Sico6000 => "Sico6000",
        }
    }

    /// Network products carry IP and Wireguard addresses instead of a modem password.
    pub fn is_network(&self) -> bool {
        matches!(self, Product::Sico2020 | Product::Sico6000)
    }

    /// Whether licenses for this product have a premium password.
    pub fn shows_premium(&self) -> bool {
        !matches!(self, Product::Sico1010)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sico1010" => Ok(Product::Sico1010),
            "sico2020" => Ok(Product::Sico2020),
            "sico5000" => Ok(Product::Sico5000),
            "sico6000" => Ok(Product::Sico6000),
            _ => Err(Error::UnknownProduct { name: s.to_string() }),
        }
    }
}
