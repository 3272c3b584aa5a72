//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the sico CLI.

use clap::{Parser, Subcommand, ValueEnum};
use sico_api_rs::models::Product;

/// sico - issue, list and revoke Sico licenses
#[derive(Parser, Debug)]
#[command(name = "sico")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// License backend URL (default: from config, then http://localhost:5000)
    #[arg(long, global = true, env = "SICO_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the license backend and store the session
    Login {
        /// User name (prompted when missing)
        #[arg(short, long)]
        user: Option<String>,

        /// Password (prompted when missing)
        #[arg(short, long, env = "SICO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Status,

    /// List the anlagen of a product
    #[command(alias = "ls")]
    List {
        /// Product line
        #[arg(value_enum)]
        product: ProductArg,

        /// Smart filter: dd.mm.yyyy, "dd.mm.yyyy - dd.mm.yyyy", yyyy, "yyyy - yyyy" or text
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        filter: Option<String>,

        /// Start of a release date range (dd.mm.yyyy)
        #[arg(long)]
        from: Option<String>,

        /// End of a release date range (dd.mm.yyyy)
        #[arg(long)]
        to: Option<String>,
    },

    /// Create or regenerate a license
    #[command(alias = "add")]
    Create {
        /// Product line
        #[arg(value_enum)]
        product: ProductArg,

        /// Neuron id of the device
        #[arg(short, long)]
        neuron_id: String,

        /// Project name (required unless the neuron id already has a license)
        #[arg(short, long)]
        project_name: Option<String>,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,

        /// Firmware version the license is issued for
        #[arg(long)]
        firmware: Option<String>,

        /// Issue a premium license
        #[arg(long)]
        premium: bool,

        /// Generate passwords without marking the anlage as licensed
        #[arg(long)]
        no_licence: bool,

        /// Wireguard address (network products only)
        #[arg(long)]
        wireguard: Option<String>,

        /// IP address (network products only)
        #[arg(long)]
        ip: Option<String>,
    },

    /// Delete a license
    #[command(alias = "rm")]
    Delete {
        /// Product line
        #[arg(value_enum)]
        product: ProductArg,

        /// Neuron id of the license to delete
        neuron_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Product lines accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductArg {
    Sico1010,
    Sico2020,
    Sico5000,
    Sico6000,
}

impl From<ProductArg> for Product {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Sico1010 => Product::Sico1010,
            ProductArg::Sico2020 => Product::Sico2020,
            ProductArg::Sico5000 => Product::Sico5000,
            ProductArg::Sico6000 => Product::Sico6000,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (api_url, token_storage, output.color)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
