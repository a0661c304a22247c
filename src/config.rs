use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// How a removed employee leaves the `employees` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// stamp `deleted_at`, keep the row
    Soft,
    /// physically remove the row
    Hard,
}

impl FromStr for DeleteMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(DeleteMode::Soft),
            "hard" => Ok(DeleteMode::Hard),
            other => bail!("unknown delete mode `{other}`, expected `soft` or `hard`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub api_prefix: String,
    pub log_dir: String,
    pub seed_demo_data: bool,
    pub delete_mode: DeleteMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let db_max_connections: u32 = var("DB_MAX_CONNECTIONS", "5")
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be a positive integer");
        }

        Ok(Self {
            server_addr: var("SERVER_ADDR", "0.0.0.0:8080"),
            database_url: var("DATABASE_URL", "sqlite::memory:"),
            db_max_connections,
            api_prefix: var("API_PREFIX", "/api/v1"),
            log_dir: var("LOG_DIR", "logs"),
            seed_demo_data: var("SEED_DEMO_DATA", "true")
                .parse()
                .context("SEED_DEMO_DATA must be `true` or `false`")?,
            delete_mode: var("DELETE_MODE", "soft").parse()?,
        })
    }
}
