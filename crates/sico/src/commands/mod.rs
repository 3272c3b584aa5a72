//! Command implementations for the sico CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod create;
pub mod delete;
pub mod keyring;
pub mod list;
pub mod login;
pub mod session;

use std::io::{self, IsTerminal};

use dialoguer::Confirm;
use sico_api_rs::client::{SicoClient, DEFAULT_BASE_URL};

use crate::cli::Cli;
use config::Config;
use session::Session;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// API error.
    #[error("API error: {0}")]
    Api(#[from] sico_api_rs::error::Error),

    /// No usable session.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid command input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The requested anlage does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// License backend URL.
    pub api_url: String,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// The backend URL comes from `--api-url`/`SICO_API_URL`, then the config
    /// file, then the built-in default. Colors are off when `--no-color`,
    /// `NO_COLOR` or `output.color = false` says so.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let api_url = cli
            .api_url
            .clone()
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let use_colors = !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && config.output.color.unwrap_or(true);

        Self {
            json_output: cli.json,
            use_colors,
            quiet: cli.quiet,
            api_url,
        }
    }

    /// Creates a client without a session, for logging in.
    pub fn anonymous_client(&self) -> Result<SicoClient> {
        Ok(SicoClient::new(&self.api_url)?)
    }

    /// Creates a client that sends the session token.
    pub fn client(&self, session: &Session) -> Result<SicoClient> {
        Ok(SicoClient::with_token(&self.api_url, &session.token)?)
    }
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Aborted,
}

/// Asks the user to confirm a destructive operation.
///
/// `force` skips the prompt. Without a terminal the operation is refused
/// instead of silently going ahead.
pub fn confirm_operation(prompt: &str, force: bool) -> Result<ConfirmResult> {
    if force {
        return Ok(ConfirmResult::Confirmed);
    }

    if !io::stdin().is_terminal() {
        return Err(CommandError::Validation(
            "refusing to continue without confirmation; pass --force in non-interactive use"
                .to_string(),
        ));
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}
