use std::env;
use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/glencity.db";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub seed_catalog: bool,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: parse_var("PORT", 5000)?,
            seed_catalog: parse_flag("SEED_CATALOG", true)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
        })
    }

    pub fn is_postgres(&self) -> bool {
        self.database_url.starts_with("postgres://") || self.database_url.starts_with("postgresql://")
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

fn parse_flag(key: &str, default: bool) -> Result<bool, AppError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("{} must be a boolean, got {:?}", key, raw))),
        },
        Err(_) => Ok(default),
    }
}
