//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables obligatorias ausentes se reportan como `AppError::Configuration`
//! al arrancar en lugar de abortar con un panic.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::football_service::LeagueDefaults;
use crate::utils::errors::AppError;

const DEFAULT_JWT_EXPIRATION: u64 = 7 * 24 * 60 * 60;
const DEFAULT_FOOTBALL_API_BASE: &str = "https://v3.football.api-sports.io";
const DEFAULT_THESPORTSDB_BASE: &str = "https://www.thesportsdb.com/api/v1/json";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Proveedores externos
    pub football_api_base: String,
    pub football_api_key: String,
    pub thesportsdb_base: String,
    pub thesportsdb_key: String,
    pub http_timeout: Duration,
    pub league_defaults: LeagueDefaults,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de una fuente arbitraria de variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &str| {
            var(name).ok_or_else(|| AppError::Configuration(format!("{} must be set", name)))
        };

        let defaults = LeagueDefaults::default();

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(var("PORT"), "PORT", 3000)?,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or(
                var("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                10,
            )?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: parse_or(var("JWT_EXPIRATION"), "JWT_EXPIRATION", DEFAULT_JWT_EXPIRATION)?,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            football_api_base: var("FOOTBALL_API_BASE")
                .unwrap_or_else(|| DEFAULT_FOOTBALL_API_BASE.to_string()),
            football_api_key: required("FOOTBALL_API_KEY")?,
            thesportsdb_base: var("THESPORTSDB_BASE")
                .unwrap_or_else(|| DEFAULT_THESPORTSDB_BASE.to_string()),
            thesportsdb_key: var("THESPORTSDB_KEY").unwrap_or_else(|| "3".to_string()),
            http_timeout: Duration::from_secs(parse_or(var("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 10)?),
            league_defaults: LeagueDefaults {
                league_id: parse_or(var("DEFAULT_LEAGUE_ID"), "DEFAULT_LEAGUE_ID", defaults.league_id)?,
                season: parse_or(var("DEFAULT_SEASON"), "DEFAULT_SEASON", defaults.season)?,
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, name: &str, default: T) -> Result<T, AppError> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a valid number, got '{}'", name, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/rodadex"),
        ("JWT_SECRET", "secret"),
        ("FOOTBALL_API_KEY", "key"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = EnvironmentConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.thesportsdb_key, "3");
        assert_eq!(config.jwt_expiration, 604_800);
        assert_eq!(config.league_defaults.league_id, 71);
        assert_eq!(config.league_defaults.season, 2023);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_missing_football_key_is_configuration_error() {
        let vars = [REQUIRED[0], REQUIRED[1]];
        let result = EnvironmentConfig::from_lookup(lookup(&vars));

        assert!(matches!(result, Err(AppError::Configuration(msg)) if msg.contains("FOOTBALL_API_KEY")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let vars = [REQUIRED[0], ("JWT_SECRET", "  "), REQUIRED[2]];
        assert!(EnvironmentConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "abc"));
        assert!(EnvironmentConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_overrides_and_cors_list() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://rodadex.app, https://admin.rodadex.app"),
            ("DEFAULT_LEAGUE_ID", "72"),
            ("DEFAULT_SEASON", "2024"),
        ]);
        let config = EnvironmentConfig::from_lookup(lookup(&vars)).unwrap();

        assert!(config.is_production());
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[1], "https://admin.rodadex.app");
        assert_eq!(config.league_defaults.league_id, 72);
        assert_eq!(config.league_defaults.season, 2024);
    }
}
