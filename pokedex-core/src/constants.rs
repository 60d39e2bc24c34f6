//! Constants for the Pokedex shell.
//!
//! Endpoint defaults, cache lifetimes and paging limits live here so the
//! fetch layer and the CLI agree on them.

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI
// ═══════════════════════════════════════════════════════════════════════════════

/// Default PokeAPI base URL (no trailing slash).
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Path segment for location-area resources.
pub const LOCATION_AREA_PATH: &str = "location-area";

/// Path segment for Pokémon resources.
pub const POKEMON_PATH: &str = "pokemon";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE LIFETIMES
// ═══════════════════════════════════════════════════════════════════════════════

/// TTL a cache falls back to when constructed with a zero duration.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 5;

/// TTL for location-area responses.
pub const LOCATION_TTL_SECONDS: u64 = 30;

/// TTL for Pokémon responses. Species data practically never changes.
pub const POKEMON_TTL_SECONDS: u64 = 24 * 60 * 60;

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATION PAGING
// ═══════════════════════════════════════════════════════════════════════════════

/// First location-area id served by PokeAPI.
pub const FIRST_LOCATION_ID: u32 = 1;

/// Number of location names shown per `map` page.
pub const LOCATION_PAGE_SIZE: usize = 20;

/// Attempts per location id before it is skipped.
pub const MAX_FETCH_ATTEMPTS: usize = 5;

/// Maximum ids visited for a single page, past its start.
/// Stops a page walk from spinning when the API keeps failing.
pub const MAX_PAGE_SCAN: u32 = 100;

// ═══════════════════════════════════════════════════════════════════════════════
// CATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Base experience at which a catch attempt is a coin flip.
pub const CATCH_MIDPOINT: f64 = 150.0;

/// Spread of the catch curve. Larger values flatten it.
pub const CATCH_DIFFICULTY: f64 = 50.0;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Overrides [`POKEAPI_BASE_URL`].
pub const ENV_BASE_URL: &str = "POKEAPI_BASE_URL";

/// Overrides [`DEFAULT_TIMEOUT_SECONDS`].
pub const ENV_TIMEOUT_SECONDS: &str = "POKEAPI_TIMEOUT_SECS";

/// Overrides [`LOCATION_TTL_SECONDS`].
pub const ENV_LOCATION_TTL: &str = "POKEDEX_LOCATION_TTL_SECS";

/// Overrides [`POKEMON_TTL_SECONDS`].
pub const ENV_POKEMON_TTL: &str = "POKEDEX_POKEMON_TTL_SECS";
