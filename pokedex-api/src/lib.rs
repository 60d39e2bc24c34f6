//! PokeAPI client with per-resource response caching.
//!
//! Every request is keyed by its URL. Location-area and Pokémon responses
//! live in separate [`pokedex_cache::TtlCache`]s so each can have its own
//! lifetime.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod config;

pub use client::{LocationPage, PokeApiClient};
pub use config::ApiConfig;
