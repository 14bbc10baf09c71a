//! Session and authentication models.

use serde::{Deserialize, Serialize};

coded_enum! {
    /// Coarse role used for client-side gating. The backend enforces access.
    pub enum Role {
        PetOwner = 0,
        Doctor = 1,
        Admin = 2,
    }
}

/// Authenticated session, persisted in durable client storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token from the login/signup response
    pub token: String,
    /// Role decoded from the token at login
    pub role: Role,
    /// Subject claim, if the token carries one
    pub user_id: Option<String>,
    /// Display name returned by the backend
    pub display_name: Option<String>,
    /// Account email
    pub email: Option<String>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_doctor(&self) -> bool {
        self.role == Role::Doctor
    }

    pub fn is_pet_owner(&self) -> bool {
        self.role == Role::PetOwner
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Pet owner signup body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
}

/// Body returned by login and signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::PetOwner.code(), 0);
        assert_eq!(Role::Doctor.code(), 1);
        assert_eq!(Role::Admin.code(), 2);
        assert_eq!(Role::from_code(3), None);
    }

    #[test]
    fn test_role_deserializes_from_code_or_name() {
        let by_code: Role = serde_json::from_str("1").unwrap();
        let by_name: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(by_code, Role::Doctor);
        assert_eq!(by_name, Role::Admin);
        assert!(serde_json::from_str::<Role>("7").is_err());
    }

    #[test]
    fn test_auth_response_optional_fields() {
        let response: AuthResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.display_name.is_none());
    }
}
