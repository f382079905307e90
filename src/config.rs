use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// ISO code prices and order totals are stored in.
    pub base_currency: String,
    pub default_country: String,
    pub secure_cookies: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let base_currency = env::var("BASE_CURRENCY")
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|_| "USD".to_string());
        let default_country =
            env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "Kenya".to_string());
        let secure_cookies = env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            base_currency,
            default_country,
            secure_cookies,
        })
    }

    /// Configuration for tests and tooling that bring their own database.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "local-development-secret".to_string(),
            base_currency: "USD".to_string(),
            default_country: "Kenya".to_string(),
            secure_cookies: false,
        }
    }
}
