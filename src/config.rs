use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub attendance_file: PathBuf,
    pub log_dir: PathBuf,

    // Rate limiting
    pub rate_submit_per_min: u32,

    pub api_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5000".to_string(),
            attendance_file: PathBuf::from("attendance.csv"),
            log_dir: PathBuf::from("logs"),
            rate_submit_per_min: 60,
            api_prefix: "/api".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or(defaults.server_addr),
            attendance_file: env::var("ATTENDANCE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.attendance_file),
            log_dir: env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),

            rate_submit_per_min: match env::var("RATE_SUBMIT_PER_MIN") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("RATE_SUBMIT_PER_MIN is not a number: {raw}"))?,
                Err(_) => defaults.rate_submit_per_min,
            },

            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
        })
    }
}
