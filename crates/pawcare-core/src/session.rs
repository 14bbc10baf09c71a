//! Session derivation from bearer tokens.
//!
//! The role is read once at login from the token's claims and persisted as a
//! coarse code. It only drives which controls the UI offers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use thiserror::Error;

use crate::models::{AuthResponse, Role, Session};

/// Claim names that may carry the role.
const ROLE_CLAIMS: &[&str] = &[
    "role",
    "roles",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];

/// Claim names that may carry the user ID.
const SUBJECT_CLAIMS: &[&str] = &[
    "sub",
    "nameid",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
];

/// Token decoding errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("token is not a JWT (expected three segments)")]
    Malformed,

    #[error("token payload is not valid base64url")]
    Encoding,

    #[error("token payload is not a JSON object")]
    Payload,
}

/// Claims the client cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub role: Role,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// Decode the payload segment of a JWT without verifying the signature.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| TokenError::Encoding)?;
    let claims: Value = serde_json::from_slice(&bytes).map_err(|_| TokenError::Payload)?;
    let claims = claims.as_object().ok_or(TokenError::Payload)?;

    let role = ROLE_CLAIMS
        .iter()
        .filter_map(|key| claims.get(*key))
        .find_map(role_from_claim)
        .unwrap_or(Role::PetOwner);

    let user_id = SUBJECT_CLAIMS
        .iter()
        .filter_map(|key| claims.get(*key))
        .find_map(|v| v.as_str().map(str::to_string));

    let email = claims
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(TokenClaims {
        role,
        user_id,
        email,
    })
}

/// Highest-privilege role named by a claim value.
fn role_from_claim(value: &Value) -> Option<Role> {
    match value {
        Value::String(name) => parse_role(name),
        Value::Number(n) => n.as_u64().and_then(|c| u8::try_from(c).ok()).and_then(Role::from_code),
        Value::Array(values) => values.iter().filter_map(role_from_claim).max(),
        _ => None,
    }
}

fn parse_role(name: &str) -> Option<Role> {
    if let Some(role) = Role::parse(name) {
        return Some(role);
    }
    match name.to_ascii_lowercase().as_str() {
        "owner" | "pet owner" | "user" | "0" => Some(Role::PetOwner),
        "vet" | "1" => Some(Role::Doctor),
        "2" => Some(Role::Admin),
        _ => None,
    }
}

/// Build a session from a login/signup response.
pub fn session_from_auth(response: AuthResponse) -> Result<Session, TokenError> {
    let claims = decode_claims(&response.token)?;
    Ok(Session {
        token: response.token,
        role: claims.role,
        user_id: claims.user_id,
        display_name: response.display_name,
        email: response.email.or(claims.email),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned JWT carrying the given claims.
    pub(crate) fn make_token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_decode_simple_role() {
        let token = make_token(serde_json::json!({"role": "Doctor", "sub": "u-1"}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, Role::Doctor);
        assert_eq!(claims.user_id, Some("u-1".into()));
    }

    #[test]
    fn test_decode_dotnet_claims() {
        let token = make_token(serde_json::json!({
            "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": "Admin",
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier": "42",
            "email": "admin@example.com"
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.user_id, Some("42".into()));
        assert_eq!(claims.email, Some("admin@example.com".into()));
    }

    #[test]
    fn test_role_array_takes_highest() {
        let token = make_token(serde_json::json!({"roles": ["PetOwner", "Doctor"]}));
        assert_eq!(decode_claims(&token).unwrap().role, Role::Doctor);
    }

    #[test]
    fn test_missing_role_defaults_to_pet_owner() {
        let token = make_token(serde_json::json!({"sub": "u-1"}));
        assert_eq!(decode_claims(&token).unwrap().role, Role::PetOwner);
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(decode_claims("abc"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Malformed));
        assert_eq!(decode_claims("a.!!!.c"), Err(TokenError::Encoding));

        let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode("nope"));
        assert_eq!(decode_claims(&not_json), Err(TokenError::Payload));
    }

    #[test]
    fn test_session_from_auth_prefers_response_email() {
        let token = make_token(serde_json::json!({"role": "PetOwner", "email": "claim@example.com"}));
        let session = session_from_auth(AuthResponse {
            token: token.clone(),
            display_name: Some("Sara".into()),
            email: Some("body@example.com".into()),
        })
        .unwrap();

        assert_eq!(session.token, token);
        assert_eq!(session.role, Role::PetOwner);
        assert_eq!(session.email, Some("body@example.com".into()));
    }
}
