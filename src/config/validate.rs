use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        }

        if auth.jwt_refresh_secret.trim().is_empty() {
            errors.push(
                "auth.jwt_refresh_secret must not be empty (refresh tokens use their own secret)"
                    .to_string(),
            );
        }

        if auth.access_ttl_secs == 0 {
            errors.push("auth.access_ttl_secs must be > 0".to_string());
        }

        if auth.refresh_ttl_days <= 0 || auth.remember_me_ttl_days <= 0 {
            errors.push("auth refresh TTLs must be > 0 days".to_string());
        }

        if auth.max_login_attempts <= 0 {
            errors.push("auth.max_login_attempts must be > 0".to_string());
        }

        if auth.lockout_minutes <= 0 {
            errors.push("auth.lockout_minutes must be > 0".to_string());
        }

        if auth.login_rate_limit_max == 0 || auth.login_rate_limit_window_secs == 0 {
            errors.push("auth login rate limit window and max must be > 0".to_string());
        }

        if auth.admin_username.trim().is_empty() || auth.admin_email.trim().is_empty() {
            errors.push("auth.admin_username and auth.admin_email must not be empty".to_string());
        }

        if auth.admin_password.len() < 8 {
            errors.push("auth.admin_password must be at least 8 characters".to_string());
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use crate::config::{AppConfig, AuthConfig};

    use super::validate;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "access-secret".to_string(),
            jwt_refresh_secret: "refresh-secret".to_string(),
            access_ttl_secs: 3600,
            refresh_ttl_days: 7,
            remember_me_ttl_days: 30,
            max_login_attempts: 5,
            lockout_minutes: 30,
            login_rate_limit_max: 5,
            login_rate_limit_window_secs: 900,
            admin_username: "admin".to_string(),
            admin_email: "admin@korsvagen.example".to_string(),
            admin_password: "adminpassword".to_string(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn missing_refresh_secret_fails_fast() {
        let mut cfg = AppConfig::default();
        let mut auth = auth_config();
        auth.jwt_refresh_secret = "  ".to_string();
        cfg.auth = Some(auth);

        let err = validate(&cfg).expect_err("validation should fail");
        assert!(err.to_string().contains("jwt_refresh_secret"));
    }

    #[test]
    fn short_admin_password_is_rejected() {
        let mut cfg = AppConfig::default();
        let mut auth = auth_config();
        auth.admin_password = "short".to_string();
        cfg.auth = Some(auth);

        assert!(validate(&cfg).is_err());
    }
}
