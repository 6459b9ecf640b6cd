use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub db_path: String,
    pub max_connections: u32,
    pub settings_path: String,
    pub default_container_width: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            port: env::var("MOMENTS_PORT")
                .unwrap_or_else(|_| "18474".to_string())
                .parse()?,
            host: env::var("MOMENTS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            db_path: env::var("MOMENTS_DB_PATH")
                .unwrap_or_else(|_| "./data/database/moments.db".to_string()),
            max_connections: env::var("MOMENTS_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()?,
            settings_path: env::var("MOMENTS_SETTINGS_PATH")
                .unwrap_or_else(|_| "./data/settings.json".to_string()),
            default_container_width: env::var("MOMENTS_DEFAULT_CONTAINER_WIDTH")
                .unwrap_or_else(|_| "1200".to_string())
                .parse()?,
        })
    }
}
