//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/sico/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Minimum token length to apply masking (show first and last N characters).
const TOKEN_MASK_MIN_LENGTH: usize = 8;

/// Number of characters to show at start/end of a masked token.
const TOKEN_MASK_VISIBLE_CHARS: usize = 4;

/// Accepted values for `token_storage`.
pub const TOKEN_STORAGE_VALUES: [&str; 2] = ["config", "keyring"];

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version; rewritten to the current one on load.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// License backend URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Where the session token is kept: "config" (default) or "keyring".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_storage: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Stored login session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_url: None,
            token_storage: None,
            output: OutputConfig::default(),
            session: None,
        }
    }
}

impl Config {
    /// Returns true if the session token lives in the OS keyring.
    pub fn uses_keyring(&self) -> bool {
        self.token_storage.as_deref() == Some("keyring")
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// The `[session]` table written by `sico login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Bearer token; absent when the token is kept in the keyring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub can_manage_licenses: bool,
}

/// Gets the config file path.
///
/// `SICO_CONFIG` wins, then `$XDG_CONFIG_HOME/sico/config.toml`, then
/// `~/.config/sico/config.toml` on all platforms.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("SICO_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("sico").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("sico").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk.
///
/// A missing file yields the default configuration.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;
    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let mut config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    // Written back with the current version on the next save.
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
///
/// The file holds the session token, so on Unix it is made readable by the
/// owner only.
pub fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;
    save_config_to(&path, config)
}

fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {}", e)))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| CommandError::Config(format!("Failed to set config permissions: {}", e)))?;
    }

    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    // Never print the raw token.
    if let Some(session) = config.session.as_mut() {
        session.token = session.token.as_deref().map(mask_token);
    }

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "api_url": ctx.api_url,
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}", path.exists());
        println!("Backend: {}\n", ctx.api_url);

        if path.exists() {
            println!("Settings:");
            if let Some(ref url) = config.api_url {
                println!("  api_url: {}", url);
            }
            if let Some(ref storage) = config.token_storage {
                println!("  token_storage: {}", storage);
            }

            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            if let Some(ref session) = config.session {
                println!("\n[session]");
                if let Some(ref user) = session.user_name {
                    println!("  user_name: {}", user);
                }
                if let Some(ref token) = session.token {
                    println!("  token: {}", token);
                }
                if let Some(expires_at) = session.expires_at {
                    println!("  expires_at: {}", expires_at.to_rfc3339());
                }
            }
        } else {
            println!("(No config file exists. Run 'sico login' or 'sico config set' to create one.)");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Applies a `key = value` assignment to the config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api_url" => {
            let url = value.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CommandError::Config(format!(
                    "Invalid api_url '{}'. Expected an http:// or https:// URL",
                    value
                )));
            }
            config.api_url = Some(url.trim_end_matches('/').to_string());
        }
        "token_storage" => {
            if !TOKEN_STORAGE_VALUES.contains(&value) {
                return Err(CommandError::Config(format!(
                    "Invalid token_storage value '{}'. Valid values: {}",
                    value,
                    TOKEN_STORAGE_VALUES.join(", ")
                )));
            }
            config.token_storage = Some(value.to_string());
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: api_url, token_storage, output.color",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Masks a token for display, showing only the first and last N characters.
pub fn mask_token(token: &str) -> String {
    let char_count = token.chars().count();
    if char_count > TOKEN_MASK_MIN_LENGTH {
        let prefix: String = token.chars().take(TOKEN_MASK_VISIBLE_CHARS).collect();
        let suffix: String = token
            .chars()
            .skip(char_count - TOKEN_MASK_VISIBLE_CHARS)
            .collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bool() {
        for value in ["true", "True", "yes", "1", "on"] {
            assert!(parse_bool(value).unwrap());
        }
        for value in ["false", "FALSE", "no", "0", "off"] {
            assert!(!parse_bool(value).unwrap());
        }
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.api_url.is_none());
        assert!(config.token_storage.is_none());
        assert!(config.output.color.is_none());
        assert!(config.session.is_none());
        assert!(!config.uses_keyring());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
api_url = "https://lic.example.com"
token_storage = "keyring"

[output]
color = false

[session]
expires_at = "2030-01-01T00:00:00Z"
user_name = "admin"
is_admin = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://lic.example.com"));
        assert!(config.uses_keyring());
        assert_eq!(config.output.color, Some(false));

        let session = config.session.unwrap();
        assert!(session.token.is_none());
        assert_eq!(session.user_name.as_deref(), Some("admin"));
        assert!(session.is_admin);
        assert!(!session.can_manage_licenses);
        assert_eq!(
            session.expires_at.unwrap().to_rfc3339(),
            "2030-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.session.is_none());
    }

    #[test]
    fn test_load_config_normalizes_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "version = 999\napi_url = \"https://lic.example.com\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.api_url.as_deref(), Some("https://lic.example.com"));
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();

        apply_setting(&mut config, "api_url", "https://lic.example.com/").unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://lic.example.com"));

        apply_setting(&mut config, "token_storage", "keyring").unwrap();
        assert!(config.uses_keyring());

        apply_setting(&mut config, "output.color", "off").unwrap();
        assert_eq!(config.output.color, Some(false));
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "api_url", "lic.example.com").is_err());
        assert!(apply_setting(&mut config, "token_storage", "env").is_err());
        assert!(apply_setting(&mut config, "output.color", "purple").is_err());

        let err = apply_setting(&mut config, "session.token", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdefghijklmnop"), "abcd...mnop");
        assert_eq!(mask_token("123456789"), "1234...6789");
        assert_eq!(mask_token("12345678"), "****");
        assert_eq!(mask_token("short"), "****");
        assert_eq!(mask_token("jwt.äöü.signature"), "jwt....ture");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: Some("https://lic.example.com".to_string()),
            session: Some(SessionConfig {
                token: Some("jwt-token-value".to_string()),
                user_name: Some("admin".to_string()),
                can_manage_licenses: true,
                ..SessionConfig::default()
            }),
            ..Config::default()
        };
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.api_url, config.api_url);
        assert_eq!(loaded.session, config.session);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_config_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        save_config_to(&path, &Config::default()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_get_config_path_env_override() {
        let original = env::var("SICO_CONFIG").ok();
        env::set_var("SICO_CONFIG", "/tmp/sico-test/config.toml");

        let path = get_config_path();

        match original {
            Some(val) => env::set_var("SICO_CONFIG", val),
            None => env::remove_var("SICO_CONFIG"),
        }

        assert_eq!(path.unwrap(), PathBuf::from("/tmp/sico-test/config.toml"));
    }

    #[test]
    #[serial]
    fn test_get_config_path_xdg() {
        let original_config = env::var("SICO_CONFIG").ok();
        let original_xdg = env::var("XDG_CONFIG_HOME").ok();
        env::remove_var("SICO_CONFIG");
        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-home");

        let path = get_config_path();

        if let Some(val) = original_config {
            env::set_var("SICO_CONFIG", val);
        }
        match original_xdg {
            Some(val) => env::set_var("XDG_CONFIG_HOME", val),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(
            path.unwrap(),
            PathBuf::from("/tmp/xdg-home/sico/config.toml")
        );
    }
}
