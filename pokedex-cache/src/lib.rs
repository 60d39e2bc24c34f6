//! Time-expiring cache for HTTP responses.
//!
//! Keys are opaque strings (in practice request URLs) and values are opaque
//! byte payloads. Entries older than the cache's TTL are never returned;
//! a background sweeper removes them every TTL so keys that are written once
//! and never read again do not accumulate.
//!
//! ```
//! use std::time::Duration;
//! use pokedex_cache::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(30));
//! assert!(cache.get("https://pokeapi.co/api/v2/pokemon/pikachu/").is_none());
//!
//! cache.put("https://pokeapi.co/api/v2/pokemon/pikachu/", &b"{}"[..]);
//! assert!(cache.get("https://pokeapi.co/api/v2/pokemon/pikachu/").is_some());
//!
//! cache.close();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheStats, TtlCache, DEFAULT_TTL};
