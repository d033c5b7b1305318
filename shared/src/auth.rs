//! Supabase API key inspection.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by a legacy Supabase API key.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiKeyClaims {
    /// Issuer, `supabase` for hosted projects
    pub iss: Option<String>,
    /// Project reference
    #[serde(rename = "ref")]
    pub project_ref: Option<String>,
    /// Postgres role the key maps to
    pub role: String,
}

/// Privilege level of a Supabase API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Public key, subject to row-level security.
    Anon,
    /// Privileged key that bypasses row-level security.
    ServiceRole,
    /// Not a recognizable Supabase key.
    Unknown,
}

impl KeyRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyRole::Anon => "anon",
            KeyRole::ServiceRole => "service_role",
            KeyRole::Unknown => "unknown",
        }
    }
}

/// Work out which role an API key grants.
///
/// The signature is not checked: the project's JWT secret is not available here,
/// and the database verifies the key on every request anyway.
pub fn key_role(key: &str) -> KeyRole {
    if key.starts_with("sb_secret_") {
        return KeyRole::ServiceRole;
    }
    if key.starts_with("sb_publishable_") {
        return KeyRole::Anon;
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    // Use a dummy key since we're not validating signature
    let dummy = DecodingKey::from_secret(b"dummy");

    match decode::<ApiKeyClaims>(key, &dummy, &validation) {
        Ok(data) => match data.claims.role.as_str() {
            "anon" => KeyRole::Anon,
            "service_role" => KeyRole::ServiceRole,
            _ => KeyRole::Unknown,
        },
        Err(_) => KeyRole::Unknown,
    }
}
