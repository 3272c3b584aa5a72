//! Login payloads.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Response of a login attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: String,
    /// Token expiry as sent by the backend.
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub can_manage_licenses: bool,
}

impl LoginResponse {
    /// Parses `expires_at` into a UTC timestamp.
    ///
    /// Accepts RFC 3339 and offset-less ISO timestamps. The latter are in the
    /// local time zone, like the release dates of the anlage rows.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.expires_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .and_then(|naive| naive.and_local_timezone(Local).earliest())
            .map(|local| local.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_login_request_wire_names() {
        let request = LoginRequest {
            user_name: "admin".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userName"], "admin");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_login_response_deserialize() {
        let json = r#"{
            "success": true,
            "token": "jwt-token",
            "expiresAt": "2026-10-20T08:00:00Z",
            "isAdmin": false,
            "canManageLicenses": true
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.token, "jwt-token");
        assert!(response.can_manage_licenses);

        let expires = response.expires_at_utc().unwrap();
        assert_eq!(expires.year(), 2026);
        assert_eq!(expires.hour(), 8);
    }

    #[test]
    fn test_expires_at_without_offset() {
        let response = LoginResponse {
            expires_at: "2026-10-20T08:00:00.123".to_string(),
            ..Default::default()
        };
        let expires = response.expires_at_utc().unwrap();

        let local = NaiveDateTime::parse_from_str("2026-10-20T08:00:00.123", "%Y-%m-%dT%H:%M:%S%.f")
            .unwrap()
            .and_local_timezone(Local)
            .earliest()
            .unwrap();
        assert_eq!(expires, local.with_timezone(&Utc));
        assert_eq!(expires.with_timezone(&Local).hour(), 8);
    }

    #[test]
    fn test_expires_at_invalid() {
        let response = LoginResponse {
            expires_at: "tomorrow".to_string(),
            ..Default::default()
        };
        assert!(response.expires_at_utc().is_none());
    }
}
