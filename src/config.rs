use clap::Parser;

pub const JWT_EXPIRED_TIME: i64 = 86400i64;

/// Courses offered per programme; course `c` spans semesters `2c - 1` and `2c`.
pub const COURSE_COUNT: i32 = 4;
pub const SEMESTER_COUNT: i32 = 8;

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env, default_value = "sqlite://academic_records.db?mode=rwc")]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = JWT_EXPIRED_TIME)]
    pub jwt_expires_in: i64,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "registrar")]
    pub registrar_username: String,

    #[clap(long, env)]
    pub registrar_password: String,

    #[clap(long, env)]
    pub default_staff_password: String,

    #[clap(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

impl Config {
    /// Settings for an in-memory database, used by tests and one-off tools.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self {
            port: 0,
            swagger_enabled: false,
            log_level: "debug".to_string(),
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.to_string(),
            jwt_expires_in: JWT_EXPIRED_TIME,
            cors_allowed_origins: "*".to_string(),
            registrar_username: "registrar".to_string(),
            registrar_password: "password123".to_string(),
            default_staff_password: "password123".to_string(),
            bcrypt_cost: 4,
            app_env: "test".to_string(),
        }
    }
}
