//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the sico-api crate,
//! making it easy for library consumers to import everything they need with a single
//! use statement.
//!
//! # Example
//!
//! ```
//! use sico_api_rs::prelude::*;
//!
//! let product: Product = "sico2020".parse().unwrap();
//! assert!(product.is_network());
//! ```

// Client types
pub use crate::client::{SicoClient, SicoClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Data models
pub use crate::models::{
    network_user_name, Anlage, DeleteRequest, DeleteResponse, LicenseRequest, LicenseResponse,
    LoginRequest, LoginResponse, Product,
};
