//! The stored login session.
//!
//! `sico login` writes the `[session]` table of the config file. The token
//! itself goes to the OS keyring instead when `token_storage = "keyring"`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sico_api_rs::models::LoginResponse;
use tracing::debug;

use super::config::{load_config, save_config, SessionConfig};
use super::{keyring, CommandError, Result};

/// A usable login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    #[serde(skip)]
    pub token: String,
    pub user_name: String,
    pub expires_at: DateTime<Utc>,
    pub is_admin: bool,
    pub can_manage_licenses: bool,
}

impl Session {
    /// Builds a session from the config table and the token, wherever it was
    /// stored. Returns `None` when any required part is missing.
    pub fn from_stored(stored: &SessionConfig, token: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.is_empty())?;
        let user_name = stored.user_name.clone().filter(|u| !u.is_empty())?;
        let expires_at = stored.expires_at?;

        Some(Self {
            token,
            user_name,
            expires_at,
            is_admin: stored.is_admin,
            can_manage_licenses: stored.can_manage_licenses,
        })
    }

    /// Builds a session from a successful login.
    pub fn from_login(response: &LoginResponse, user_name: &str) -> Result<Self> {
        let expires_at = response.expires_at_utc().ok_or_else(|| {
            CommandError::Auth(format!(
                "Login response has an unreadable expiry: '{}'",
                response.expires_at
            ))
        })?;

        if response.token.is_empty() {
            return Err(CommandError::Auth(
                "Login response did not contain a token".to_string(),
            ));
        }

        Ok(Self {
            token: response.token.clone(),
            user_name: user_name.to_string(),
            expires_at,
            is_admin: response.is_admin,
            can_manage_licenses: response.can_manage_licenses,
        })
    }

    /// A session is valid until its expiry.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Loads the stored session, whether or not it has expired.
pub fn load_session() -> Result<Option<Session>> {
    let config = load_config()?;
    let Some(stored) = config.session.as_ref() else {
        return Ok(None);
    };

    let token = if config.uses_keyring() {
        keyring::get_token()?
    } else {
        stored.token.clone()
    };

    Ok(Session::from_stored(stored, token))
}

/// Persists a session.
pub fn save_session(session: &Session) -> Result<()> {
    let mut config = load_config()?;

    let token = if config.uses_keyring() {
        keyring::store_token(&session.token)?;
        None
    } else {
        Some(session.token.clone())
    };

    config.session = Some(SessionConfig {
        token,
        expires_at: Some(session.expires_at),
        user_name: Some(session.user_name.clone()),
        is_admin: session.is_admin,
        can_manage_licenses: session.can_manage_licenses,
    });
    save_config(&config)?;

    debug!(user = %session.user_name, expires_at = %session.expires_at, "session stored");
    Ok(())
}

/// Removes the stored session. Returns whether one existed.
pub fn clear_session() -> Result<bool> {
    let mut config = load_config()?;
    if config.uses_keyring() {
        keyring::delete_token()?;
    }

    let existed = config.session.take().is_some();
    if existed {
        save_config(&config)?;
    }
    Ok(existed)
}

/// Returns the stored session or an auth error when there is none or it has expired.
pub fn require_session() -> Result<Session> {
    let session = load_session()?
        .ok_or_else(|| CommandError::Auth("Not logged in. Run 'sico login'.".to_string()))?;

    if !session.is_valid(Utc::now()) {
        return Err(CommandError::Auth(
            "Session expired. Run 'sico login'.".to_string(),
        ));
    }

    Ok(session)
}
