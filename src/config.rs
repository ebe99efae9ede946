use crate::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub name: String,
    pub nationality: String,
    pub age: u32,
    pub team: String,
    pub event: String,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        PlayerProfile {
            name: "Danil 'molodoy' Golubenko".to_string(),
            nationality: "Kazakhstan".to_string(),
            age: 20,
            team: "FURIA".to_string(),
            event: "IEM Cologne 2025".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub matches_csv: PathBuf,
    pub series_csv: PathBuf,
    pub photo: PathBuf,
    pub logo_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub profile: PlayerProfile,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let port = match env::var("DASHBOARD_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::ConfigError(format!("DASHBOARD_PORT is not a valid port: {}", raw))
            })?,
            Err(_) => 8501,
        };

        let defaults = PlayerProfile::default();
        let age = match env::var("DASHBOARD_AGE") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::ConfigError(format!("DASHBOARD_AGE is not a valid age: {}", raw))
            })?,
            Err(_) => defaults.age,
        };

        let profile = PlayerProfile {
            name: env::var("DASHBOARD_PLAYER").unwrap_or(defaults.name),
            nationality: env::var("DASHBOARD_NATIONALITY").unwrap_or(defaults.nationality),
            age,
            team: env::var("DASHBOARD_TEAM").unwrap_or(defaults.team),
            event: env::var("DASHBOARD_EVENT").unwrap_or(defaults.event),
        };

        Ok(Config {
            matches_csv: path_var("DASHBOARD_MATCHES_CSV", "molodoy_partidas.csv"),
            series_csv: path_var("DASHBOARD_SERIES_CSV", "molodoy_series.csv"),
            photo: path_var("DASHBOARD_PHOTO", "molodoy.png"),
            logo_dir: path_var("DASHBOARD_LOGO_DIR", "logos"),
            host: env::var("DASHBOARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            profile,
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
