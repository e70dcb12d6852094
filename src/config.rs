use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub first_superuser_email: Option<String>,
    pub first_superuser_password: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            // Собираем DSN из отдельных POSTGRES_* переменных
            Err(_) => {
                let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".into());
                let password =
                    std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "postgres".into());
                let server =
                    std::env::var("POSTGRES_SERVER").unwrap_or_else(|_| "localhost".into());
                let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".into());
                let db = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "postgres".into());
                format!("postgres://{user}:{password}@{server}:{port}/{db}")
            }
        };
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "usergate".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "usergate-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        Ok(Self {
            database_url,
            jwt,
            first_superuser_email: std::env::var("FIRST_SUPERUSER_EMAIL").ok(),
            first_superuser_password: std::env::var("FIRST_SUPERUSER_PASSWORD").ok(),
        })
    }
}
