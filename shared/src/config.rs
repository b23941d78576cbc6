use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let booking = BookingConfig {
            strict_conflicts: std::env::var("BOOKING_STRICT_CONFLICTS")
                .map(|v| v == "true")
                .unwrap_or(false),
            check_in_grace_minutes: std::env::var("CHECK_IN_GRACE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        };
        Ok(Self {
            database,
            redis,
            auth,
            booking,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

// 予約まわりのポリシー設定。
// strict_conflicts が true の場合、時間帯の重複を検出した予約は作成を拒否する。
#[derive(Clone)]
pub struct BookingConfig {
    pub strict_conflicts: bool,
    pub check_in_grace_minutes: i64,
}
