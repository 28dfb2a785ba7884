use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first.
    ///
    /// Falls back to a local SQLite file when `DATABASE_URL` is unset, so
    /// the crate works out of the box without any setup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:auth.db".into());
        Self { database_url }
    }
}
