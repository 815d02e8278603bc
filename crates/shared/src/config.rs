//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Gamification point policy.
    #[serde(default)]
    pub gamification: GamificationConfig,
    /// Advisor text-generation gateway configuration.
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    604800 // 7 days
}

/// Gamification point policy.
///
/// The streak bonus interval is fixed policy, not configuration; see
/// `sprout-core::gamification::STREAK_MILESTONE_DAYS`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GamificationConfig {
    /// Base points awarded for every daily check-in.
    #[serde(default = "default_points_per_check_in")]
    pub points_per_check_in: i32,
    /// Bonus points awarded per completed 5-day streak milestone.
    #[serde(default = "default_streak_bonus_points")]
    pub streak_bonus_points: i32,
}

fn default_points_per_check_in() -> i32 {
    10
}

fn default_streak_bonus_points() -> i32 {
    5
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            points_per_check_in: default_points_per_check_in(),
            streak_bonus_points: default_streak_bonus_points(),
        }
    }
}

/// Advisor text-generation gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Completion endpoint URL.
    #[serde(default = "default_advisor_url")]
    pub api_url: String,
    /// Bearer API key for the gateway.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier passed to the gateway.
    #[serde(default = "default_advisor_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

fn default_advisor_url() -> String {
    "http://localhost:8090/v1/completions".to_string()
}

fn default_advisor_model() -> String {
    "gemini-flash-latest".to_string()
}

fn default_advisor_timeout() -> u64 {
    120
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_url: default_advisor_url(),
            api_key: String::new(),
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPROUT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamification_defaults() {
        let config = GamificationConfig::default();
        assert_eq!(config.points_per_check_in, 10);
        assert_eq!(config.streak_bonus_points, 5);
    }

    #[test]
    fn test_advisor_defaults() {
        let config = AdvisorConfig::default();
        assert_eq!(config.model, "gemini-flash-latest");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_empty());
    }
}
