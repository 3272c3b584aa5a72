//! Session token storage in the OS credential manager.
//!
//! Used when `token_storage = "keyring"` is set in the config. The rest of the
//! session (user name, expiry, permissions) stays in the config file.

use keyring::Entry;

use super::{CommandError, Result};

/// Service name for keyring entries.
const SERVICE: &str = "sico-cli";

/// Account name of the session token entry.
const USERNAME: &str = "session_token";

/// Fallback every hint ends with.
const ALTERNATIVE: &str = "Alternative: run 'sico config set token_storage config' to keep the session in the config file";

/// Appends a platform hint to keyring errors that usually mean a missing or
/// locked credential store.
fn platform_hint(error: &keyring::Error) -> String {
    let hint = match error {
        keyring::Error::NoStorageAccess(_) => platform_access_hint(),
        keyring::Error::PlatformFailure(_) => platform_failure_hint(),
        _ => return error.to_string(),
    };

    format!("{}\n\nHint: {}\n\n{}", error, hint, ALTERNATIVE)
}

#[cfg(target_os = "linux")]
fn platform_access_hint() -> &'static str {
    "sico stores the session token through the Secret Service API (libsecret).\n\
     Make sure a provider such as gnome-keyring or kwallet is installed and unlocked.\n\
     Headless: 'dbus-run-session -- gnome-keyring-daemon --unlock'"
}

#[cfg(target_os = "macos")]
fn platform_access_hint() -> &'static str {
    "sico stores the session token in the Keychain.\n\
     Unlock the login keychain: 'security unlock-keychain ~/Library/Keychains/login.keychain-db'"
}

#[cfg(target_os = "windows")]
fn platform_access_hint() -> &'static str {
    "sico stores the session token in Credential Manager.\n\
     Check Windows Credentials in Credential Manager for access problems."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_access_hint() -> &'static str {
    "The platform credential storage is not accessible."
}

#[cfg(target_os = "linux")]
fn platform_failure_hint() -> &'static str {
    "The Secret Service API failed. In containers and SSH sessions the D-Bus\n\
     session bus is often missing: try 'eval $(dbus-launch --sh-syntax)'."
}

#[cfg(target_os = "macos")]
fn platform_failure_hint() -> &'static str {
    "The Keychain failed. Try 'Keychain First Aid' in Keychain Access."
}

#[cfg(target_os = "windows")]
fn platform_failure_hint() -> &'static str {
    "Credential Manager failed. Make sure the 'Credential Manager' service is running."
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_failure_hint() -> &'static str {
    "The platform credential storage failed."
}

fn entry() -> Result<Entry> {
    Entry::new(SERVICE, USERNAME)
        .map_err(|e| CommandError::Config(format!("Keyring error: {}", platform_hint(&e))))
}

/// Stores the session token.
pub fn store_token(token: &str) -> Result<()> {
    entry()?
        .set_password(token)
        .map_err(|e| CommandError::Config(format!("Failed to store token: {}", platform_hint(&e))))
}

/// Reads the session token; `Ok(None)` when nothing is stored.
pub fn get_token() -> Result<Option<String>> {
    match entry()?.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) | Err(keyring::Error::Ambiguous(_)) => Ok(None),
        Err(e) => Err(CommandError::Config(format!(
            "Failed to read token: {}",
            platform_hint(&e)
        ))),
    }
}

/// Removes the session token. Succeeds when nothing was stored.
pub fn delete_token() -> Result<()> {
    match entry()?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(CommandError::Config(format!(
            "Failed to delete token: {}",
            platform_hint(&e)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // store/get/delete need a live credential store and would touch the
    // user's keyring, so only the error decoration is covered here.

    #[test]
    fn test_platform_hint_no_entry_returns_base_error() {
        let hint = platform_hint(&keyring::Error::NoEntry);
        assert!(!hint.contains("Hint:"));
        assert!(!hint.contains("token_storage"));
    }

    #[test]
    fn test_platform_hint_bad_encoding_returns_base_error() {
        let hint = platform_hint(&keyring::Error::BadEncoding(vec![0x80, 0x81]));
        assert!(!hint.contains("Hint:"));
    }

    #[test]
    fn test_platform_hint_access_error_mentions_alternative() {
        let error = keyring::Error::NoStorageAccess(Box::new(std::io::Error::other("locked")));
        let hint = platform_hint(&error);
        assert!(hint.contains("Hint:"));
        assert!(hint.contains(platform_access_hint()));
        assert!(hint.contains("sico config set token_storage config"));
    }

    #[test]
    fn test_platform_hint_failure_mentions_alternative() {
        let error = keyring::Error::PlatformFailure(Box::new(std::io::Error::other("dbus")));
        let hint = platform_hint(&error);
        assert!(hint.contains(platform_failure_hint()));
        assert!(hint.contains("sico config set token_storage config"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_access_hint_mentions_secret_service() {
        let hint = platform_access_hint();
        assert!(hint.contains("Secret Service"));
        assert!(hint.contains("gnome-keyring"));
    }
}
