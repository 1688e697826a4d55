pub mod jwt;
pub mod password;
pub mod rate_limit;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Editor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Editor => "editor",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            _ => Err(()),
        }
    }
}

/// A set of roles allowed through a role-gated route. Role checks read the
/// verified token claims only; a server-side role change takes effect once
/// the current access token expires.
pub trait RoleSet {
    fn allows(role: Role) -> bool;
    fn describe() -> &'static str;
}

/// Any staff account: editors and above. Gates content mutations.
pub struct Editors;

impl RoleSet for Editors {
    fn allows(_role: Role) -> bool {
        true
    }

    fn describe() -> &'static str {
        "editor"
    }
}

/// Admin or super admin. Gates settings and contact-inbox access.
pub struct Admins;

impl RoleSet for Admins {
    fn allows(role: Role) -> bool {
        matches!(role, Role::Admin | Role::SuperAdmin)
    }

    fn describe() -> &'static str {
        "admin"
    }
}

/// Claims signed into an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Claims signed into a refresh token. The `type` claim distinguishes it
/// from an access token; its absence deserializes to an empty string so the
/// verifier can report a type mismatch rather than a parse failure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// The access/refresh pair returned by login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
