//! Login, logout and status commands.
//!
//! A successful login stores the session (token, user, expiry, permissions)
//! so later commands can talk to the backend without asking again.

use std::io::{self, IsTerminal};

use chrono::Utc;
use dialoguer::{Input, Password};
use owo_colors::OwoColorize;
use tracing::debug;

use super::session::{clear_session, load_session, save_session, Session};
use super::{CommandContext, CommandError, Result};

/// Options for the login command.
#[derive(Debug)]
pub struct LoginOptions {
    /// User name; prompted when missing.
    pub user: Option<String>,
    /// Password; prompted when missing.
    pub password: Option<String>,
}

fn prompt_error(e: dialoguer::Error) -> CommandError {
    CommandError::Io(io::Error::other(e.to_string()))
}

/// Resolves the credentials, prompting for whatever was not given.
fn credentials(opts: &LoginOptions) -> Result<(String, String)> {
    let interactive = io::stdin().is_terminal();

    let user = match opts.user.as_deref().map(str::trim) {
        Some(user) if !user.is_empty() => user.to_string(),
        _ if interactive => Input::<String>::new()
            .with_prompt("User")
            .interact_text()
            .map_err(prompt_error)?
            .trim()
            .to_string(),
        _ => {
            return Err(CommandError::Validation(
                "user name is required (--user)".to_string(),
            ))
        }
    };

    let password = match opts.password.as_deref() {
        Some(password) if !password.is_empty() => password.to_string(),
        _ if interactive => Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(prompt_error)?,
        _ => {
            return Err(CommandError::Validation(
                "password is required (--password or SICO_PASSWORD)".to_string(),
            ))
        }
    };

    if user.is_empty() {
        return Err(CommandError::Validation("user name must not be empty".to_string()));
    }

    Ok((user, password))
}

/// Executes the login command.
pub async fn execute_login(ctx: &CommandContext, opts: &LoginOptions) -> Result<()> {
    let (user, password) = credentials(opts)?;

    debug!(user = %user, api_url = %ctx.api_url, "logging in");
    let response = ctx.anonymous_client()?.login(&user, &password).await?;
    if !response.success {
        return Err(CommandError::Auth(
            "Login failed: wrong user name or password".to_string(),
        ));
    }

    let session = Session::from_login(&response, &user)?;
    save_session(&session)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else if !ctx.quiet {
        let message = format!("Logged in as {}", session.user_name);
        if ctx.use_colors {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
    }

    Ok(())
}

/// Executes the logout command.
pub fn execute_logout(ctx: &CommandContext) -> Result<()> {
    let existed = clear_session()?;

    if ctx.json_output {
        let output = serde_json::json!({ "logged_out": existed });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if existed {
            println!("Logged out.");
        } else {
            println!("No session stored.");
        }
    }

    Ok(())
}

/// Executes the status command.
pub fn execute_status(ctx: &CommandContext) -> Result<()> {
    let session = load_session()?;
    let valid = session.as_ref().is_some_and(|s| s.is_valid(Utc::now()));

    if ctx.json_output {
        let output = serde_json::json!({
            "logged_in": valid,
            "api_url": ctx.api_url,
            "session": session,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match session {
        None => println!("Not logged in."),
        Some(session) => {
            let state = if valid { "Logged in" } else { "Session expired" };
            println!("{} as {}", state, session.user_name);
            println!("Backend: {}", ctx.api_url);
            println!("Expires: {}", session.expires_at.to_rfc3339());
            println!(
                "Permissions: {}{}",
                if session.is_admin { "admin, " } else { "" },
                if session.can_manage_licenses {
                    "manage licenses"
                } else {
                    "read only"
                }
            );
        }
    }

    Ok(())
}
