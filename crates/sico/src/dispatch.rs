//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into those that work without a session (login, config,
//! completions, ...) and those that need one to talk to the backend.

use sico_api_rs::models::Product;

use crate::cli::{Cli, Commands, ConfigCommands, ProductArg, Shell};
use crate::commands::session::Session;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that can be executed without a session.
#[allow(async_fn_in_trait)]
pub trait NoAuthCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that require a session.
#[allow(async_fn_in_trait)]
pub trait AuthCommand {
    async fn execute(&self, ctx: &CommandContext, session: &Session) -> Result<()>;
}

/// Commands that don't require a session.
#[derive(Debug)]
pub enum NoAuthDispatch<'a> {
    Login {
        user: &'a Option<String>,
        password: &'a Option<String>,
    },
    Logout,
    Status,
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> NoAuthDispatch<'a> {
    /// Returns `None` if the command requires a session.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Login { user, password }) => Some(Self::Login { user, password }),
            Some(Commands::Logout) => Some(Self::Logout),
            Some(Commands::Status) => Some(Self::Status),
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoAuthCommand for NoAuthDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Login { user, password } => {
                let opts = commands::login::LoginOptions {
                    user: (*user).clone(),
                    password: (*password).clone(),
                };
                commands::login::execute_login(ctx, &opts).await
            }
            Self::Logout => commands::login::execute_logout(ctx),
            Self::Status => commands::login::execute_status(ctx),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("sico - Sico license tool");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that require a session.
#[derive(Debug)]
pub enum AuthDispatch<'a> {
    List {
        product: ProductArg,
        filter: &'a Option<String>,
        from: &'a Option<String>,
        to: &'a Option<String>,
    },
    Create {
        product: ProductArg,
        neuron_id: &'a str,
        project_name: &'a Option<String>,
        description: &'a Option<String>,
        firmware: &'a Option<String>,
        premium: bool,
        no_licence: bool,
        wireguard: &'a Option<String>,
        ip: &'a Option<String>,
    },
    Delete {
        product: ProductArg,
        neuron_id: &'a str,
        force: bool,
    },
}

impl<'a> AuthDispatch<'a> {
    /// Returns `None` for commands handled by [`NoAuthDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                product,
                filter,
                from,
                to,
            }) => Some(Self::List {
                product: *product,
                filter,
                from,
                to,
            }),
            Some(Commands::Create {
                product,
                neuron_id,
                project_name,
                description,
                firmware,
                premium,
                no_licence,
                wireguard,
                ip,
            }) => Some(Self::Create {
                product: *product,
                neuron_id,
                project_name,
                description,
                firmware,
                premium: *premium,
                no_licence: *no_licence,
                wireguard,
                ip,
            }),
            Some(Commands::Delete {
                product,
                neuron_id,
                force,
            }) => Some(Self::Delete {
                product: *product,
                neuron_id,
                force: *force,
            }),
            _ => None,
        }
    }
}

impl AuthCommand for AuthDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, session: &Session) -> Result<()> {
        match self {
            Self::List {
                product,
                filter,
                from,
                to,
            } => {
                let opts = commands::list::ListOptions {
                    product: Product::from(*product),
                    filter: (*filter).clone(),
                    from: (*from).clone(),
                    to: (*to).clone(),
                };
                commands::list::execute(ctx, &opts, session).await
            }

            Self::Create {
                product,
                neuron_id,
                project_name,
                description,
                firmware,
                premium,
                no_licence,
                wireguard,
                ip,
            } => {
                let opts = commands::create::CreateOptions {
                    product: Product::from(*product),
                    neuron_id: neuron_id.to_string(),
                    project_name: (*project_name).clone(),
                    description: (*description).clone(),
                    firmware: (*firmware).clone(),
                    premium: *premium,
                    no_licence: *no_licence,
                    wireguard: (*wireguard).clone(),
                    ip: (*ip).clone(),
                };
                commands::create::execute(ctx, &opts, session).await
            }

            Self::Delete {
                product,
                neuron_id,
                force,
            } => {
                let opts = commands::delete::DeleteOptions {
                    product: Product::from(*product),
                    neuron_id: neuron_id.to_string(),
                    force: *force,
                };
                commands::delete::execute(ctx, &opts, session).await
            }
        }
    }
}
