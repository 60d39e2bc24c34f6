//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use pokedex_core::constants::{
    DEFAULT_TIMEOUT_SECONDS, ENV_BASE_URL, ENV_LOCATION_TTL, ENV_POKEMON_TTL,
    ENV_TIMEOUT_SECONDS, LOCATION_TTL_SECONDS, POKEAPI_BASE_URL, POKEMON_TTL_SECONDS,
};
use pokedex_core::error::{PokedexError, Result};

/// PokeAPI client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Lifetime of cached location-area responses in seconds
    pub location_ttl_seconds: u64,
    /// Lifetime of cached Pokémon responses in seconds
    pub pokemon_ttl_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            location_ttl_seconds: LOCATION_TTL_SECONDS,
            pokemon_ttl_seconds: POKEMON_TTL_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads overrides from the environment (and `.env`, if present).
    ///
    /// Unset variables keep their defaults; set but unparsable ones are an
    /// error.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Ok(Self {
            base_url: std::env::var(ENV_BASE_URL).unwrap_or(defaults.base_url),
            timeout_seconds: env_seconds(ENV_TIMEOUT_SECONDS, defaults.timeout_seconds)?,
            location_ttl_seconds: env_seconds(ENV_LOCATION_TTL, defaults.location_ttl_seconds)?,
            pokemon_ttl_seconds: env_seconds(ENV_POKEMON_TTL, defaults.pokemon_ttl_seconds)?,
        })
    }

    /// Sets the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the location-area cache lifetime.
    pub fn with_location_ttl_seconds(mut self, seconds: u64) -> Self {
        self.location_ttl_seconds = seconds;
        self
    }

    /// Sets the Pokémon cache lifetime.
    pub fn with_pokemon_ttl_seconds(mut self, seconds: u64) -> Self {
        self.pokemon_ttl_seconds = seconds;
        self
    }

    /// Parses and checks `base_url`.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| PokedexError::ConfigError(format!("invalid base URL '{}': {e}", self.base_url)))?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(PokedexError::ConfigError(format!(
                "base URL must be an http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Checks the whole configuration and returns the parsed API root.
    ///
    /// A zero timeout is rejected: reqwest would fail every request at once.
    pub fn validate(&self) -> Result<Url> {
        if self.timeout_seconds == 0 {
            return Err(PokedexError::ConfigError(
                "request timeout must be at least one second".into(),
            ));
        }
        self.base_url()
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(crate) fn location_ttl(&self) -> Duration {
        Duration::from_secs(self.location_ttl_seconds)
    }

    pub(crate) fn pokemon_ttl(&self) -> Duration {
        Duration::from_secs(self.pokemon_ttl_seconds)
    }
}

fn env_seconds(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PokedexError::ConfigError(format!("{name} must be a whole number of seconds, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.location_ttl(), Duration::from_secs(30));
        assert_eq!(config.pokemon_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_builders() {
        let config = ApiConfig::new("http://localhost:8080")
            .with_timeout_seconds(2)
            .with_location_ttl_seconds(5)
            .with_pokemon_ttl_seconds(60);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.location_ttl_seconds, 5);
        assert_eq!(config.pokemon_ttl_seconds, 60);
    }

    #[test]
    fn test_base_url_validation() {
        assert!(ApiConfig::default().base_url().is_ok());
        assert!(matches!(
            ApiConfig::new("not a url").base_url(),
            Err(PokedexError::ConfigError(_))
        ));
        assert!(matches!(
            ApiConfig::new("mailto:ash@pallet.town").base_url(),
            Err(PokedexError::ConfigError(_))
        ));
        assert!(ApiConfig::new("ftp://pokeapi.co/api/v2").base_url().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ApiConfig::default().validate().is_ok());
        assert!(ApiConfig::default().with_timeout_seconds(1).validate().is_ok());
        assert!(matches!(
            ApiConfig::default().with_timeout_seconds(0).validate(),
            Err(PokedexError::ConfigError(_))
        ));
        assert!(matches!(
            ApiConfig::new("not a url").with_timeout_seconds(5).validate(),
            Err(PokedexError::ConfigError(_))
        ));
    }
}
