pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";

pub const DEFAULT_DB_MAX_CONNECTIONS: i64 = 10;
pub const DEFAULT_DB_MIN_IDLE: i64 = 2;

pub const DEFAULT_ACCESS_TTL_SECS: i64 = 60 * 60;
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;
pub const DEFAULT_REMEMBER_ME_TTL_DAYS: i64 = 30;
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: i64 = 5;
pub const DEFAULT_LOCKOUT_MINUTES: i64 = 30;
pub const DEFAULT_LOGIN_RATE_LIMIT_MAX: i64 = 5;
pub const DEFAULT_LOGIN_RATE_LIMIT_WINDOW_SECS: i64 = 15 * 60;
