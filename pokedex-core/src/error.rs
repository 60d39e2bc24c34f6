//! Error types for the Pokedex crates.
//!
//! The cache itself never fails; everything here belongs to the fetch
//! layer and the shell built on top of it.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // API ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The API has no resource with this name or id.
    #[error("{resource} not found: {name}")]
    NotFound { resource: &'static str, name: String },

    /// The API answered with a non-success status other than 404.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a status was received.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A response body (fresh or cached) did not decode.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Command input was malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PokedexError {
    /// Returns true if retrying the same request may succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::HttpError(_) => true,
            PokedexError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if the API reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = PokedexError::NotFound {
            resource: "pokemon",
            name: "missingno".into(),
        };
        assert_eq!(err.to_string(), "pokemon not found: missingno");
    }

    #[test_case(500, true ; "server error")]
    #[test_case(503, true ; "unavailable")]
    #[test_case(429, true ; "rate limited")]
    #[test_case(400, false ; "bad request")]
    #[test_case(403, false ; "forbidden")]
    fn test_status_recoverability(status: u16, recoverable: bool) {
        let err = PokedexError::HttpStatus {
            status,
            url: "https://pokeapi.co/api/v2/pokemon/pikachu/".into(),
        };
        assert_eq!(err.is_recoverable(), recoverable);
    }

    #[test]
    fn test_error_classification() {
        assert!(PokedexError::HttpError("reset".into()).is_recoverable());
        assert!(!PokedexError::InvalidInput("x".into()).is_recoverable());

        let missing = PokedexError::NotFound {
            resource: "location area",
            name: "nowhere".into(),
        };
        assert!(missing.is_not_found());
        assert!(!missing.is_recoverable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PokedexError::from);
        assert!(matches!(result, Err(PokedexError::JsonError(_))));
    }
}
