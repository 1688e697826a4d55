use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use super::{AccessClaims, RefreshClaims, Role};
use crate::error::AppError;

pub const ISSUER: &str = "korsvagen-api";
pub const AUDIENCE: &str = "korsvagen-admin";

pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Signing/verification keys for both token classes. Access and refresh
/// tokens use distinct secrets; config validation guarantees both exist.
#[derive(Clone)]
pub struct TokenKeys {
    pub access_enc: EncodingKey,
    pub access_dec: DecodingKey,
    pub refresh_enc: EncodingKey,
    pub refresh_dec: DecodingKey,
}

impl TokenKeys {
    pub fn from_secrets(access: &[u8], refresh: &[u8]) -> Self {
        Self {
            access_enc: EncodingKey::from_secret(access),
            access_dec: DecodingKey::from_secret(access),
            refresh_enc: EncodingKey::from_secret(refresh),
            refresh_dec: DecodingKey::from_secret(refresh),
        }
    }
}

/// Why a token failed verification. `Expired` and `WrongType` are surfaced
/// distinctly; everything else (bad signature, claim shape, issuer/audience
/// mismatch) collapses into `Malformed`.
#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    WrongType,
    Malformed(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token expired"),
            TokenError::WrongType => write!(f, "Wrong token type"),
            TokenError::Malformed(reason) => write!(f, "Invalid token: {reason}"),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

pub fn make_access_claims(
    user_id: &Uuid,
    email: &str,
    role: Role,
    ttl_secs: usize,
) -> AccessClaims {
    let iat = now_unix();
    AccessClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat,
        exp: iat + ttl_secs,
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
    }
}

pub fn make_refresh_claims(user_id: &Uuid, ttl_secs: usize) -> RefreshClaims {
    let iat = now_unix();
    RefreshClaims {
        sub: user_id.to_string(),
        token_type: REFRESH_TOKEN_TYPE.to_string(),
        iat,
        exp: iat + ttl_secs,
        iss: ISSUER.to_string(),
        aud: AUDIENCE.to_string(),
    }
}

pub fn issue_access_token(keys: &TokenKeys, claims: &AccessClaims) -> Result<String, AppError> {
    encode(&header(), claims, &keys.access_enc)
        .map_err(|err| AppError::internal_with_source("Token encoding failed", err))
}

pub fn issue_refresh_token(keys: &TokenKeys, claims: &RefreshClaims) -> Result<String, AppError> {
    encode(&header(), claims, &keys.refresh_enc)
        .map_err(|err| AppError::internal_with_source("Token encoding failed", err))
}

pub fn verify_access_token(keys: &TokenKeys, token: &str) -> Result<AccessClaims, TokenError> {
    let data = decode::<AccessClaims>(token, &keys.access_dec, &validation())
        .map_err(map_decode_error)?;
    Ok(data.claims)
}

pub fn verify_refresh_token(keys: &TokenKeys, token: &str) -> Result<RefreshClaims, TokenError> {
    let data = decode::<RefreshClaims>(token, &keys.refresh_dec, &validation())
        .map_err(map_decode_error)?;

    if data.claims.token_type != REFRESH_TOKEN_TYPE {
        return Err(TokenError::WrongType);
    }

    Ok(data.claims)
}

fn header() -> Header {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());
    header
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[AUDIENCE]);
    validation
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::auth::Role;

    use super::{
        TokenError, TokenKeys, issue_access_token, issue_refresh_token, make_access_claims,
        make_refresh_claims, verify_access_token, verify_refresh_token,
    };

    fn keys() -> TokenKeys {
        TokenKeys::from_secrets(b"unit-test-access", b"unit-test-refresh")
    }

    #[test]
    fn access_claims_carry_subject_role_and_ttl() {
        let user_id = Uuid::new_v4();
        let claims = make_access_claims(&user_id, "ops@korsvagen.example", Role::Admin, 60);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp.saturating_sub(claims.iat), 60);
    }

    #[test]
    fn access_token_roundtrip() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let claims = make_access_claims(&user_id, "ops@korsvagen.example", Role::Editor, 600);
        let token = issue_access_token(&keys, &claims).expect("token should encode");

        let verified = verify_access_token(&keys, &token).expect("token should verify");
        assert_eq!(verified.sub, claims.sub);
        assert_eq!(verified.role, Role::Editor);
    }

    #[test]
    fn refresh_token_roundtrip_checks_type_claim() {
        let keys = keys();
        let claims = make_refresh_claims(&Uuid::new_v4(), 600);
        let token = issue_refresh_token(&keys, &claims).expect("token should encode");

        let verified = verify_refresh_token(&keys, &token).expect("token should verify");
        assert_eq!(verified.token_type, "refresh");
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let keys = keys();
        let other = TokenKeys::from_secrets(b"other-access", b"other-refresh");
        let claims = make_access_claims(&Uuid::new_v4(), "x@korsvagen.example", Role::Editor, 600);
        let token = issue_access_token(&other, &claims).expect("token should encode");

        let err = verify_access_token(&keys, &token).expect_err("verify should fail");
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn expired_access_token_is_rejected_as_expired() {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let mut claims = make_access_claims(&user_id, "x@korsvagen.example", Role::Editor, 600);
        claims.iat = claims.iat.saturating_sub(7200);
        claims.exp = claims.iat + 60;
        let token = issue_access_token(&keys, &claims).expect("token should encode");

        let err = verify_access_token(&keys, &token).expect_err("verify should fail");
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn access_token_presented_as_refresh_is_rejected() {
        let keys = keys();
        // Signed with the refresh secret but missing the type claim.
        let claims = make_access_claims(&Uuid::new_v4(), "x@korsvagen.example", Role::Editor, 600);
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &keys.refresh_enc,
        )
        .expect("token should encode");

        let err = verify_refresh_token(&keys, &token).expect_err("verify should fail");
        assert_eq!(err, TokenError::WrongType);
    }

    #[test]
    fn issuer_mismatch_is_malformed() {
        let keys = keys();
        let mut claims = make_refresh_claims(&Uuid::new_v4(), 600);
        claims.iss = "someone-else".to_string();
        let token = issue_refresh_token(&keys, &claims).expect("token should encode");

        let err = verify_refresh_token(&keys, &token).expect_err("verify should fail");
        assert!(matches!(err, TokenError::Malformed(_)));
    }
}
