//! Client library for the Sico license backend.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use sico_api_rs::prelude::*;
//! ```
//!
//! This re-exports the most commonly used types including [`SicoClient`],
//! error types, and the wire models for anlagen, licenses, and logins.
//!
//! [`SicoClient`]: client::SicoClient

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
mod retry;
