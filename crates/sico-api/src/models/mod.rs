//! Wire models for the Sico license backend.
//!
//! All payloads use camelCase JSON field names.

mod anlage;
mod auth;
mod license;
mod product;

pub use anlage::Anlage;
pub use auth::{LoginRequest, LoginResponse};
pub use license::{network_user_name, DeleteRequest, DeleteResponse, LicenseRequest, LicenseResponse};
pub use product::Product;
