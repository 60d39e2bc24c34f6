//! # Pokedex Core
//!
//! Core types, errors, and constants shared by the Pokedex crates.
//!
//! - **Types**: PokeAPI response models (location areas, Pokémon)
//! - **Errors**: A single error hierarchy for fetching and decoding
//! - **Constants**: API endpoints, cache lifetimes, paging limits
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{Pokemon, PokedexError};
//!
//! let json = r#"{"id":25,"name":"pikachu","base_experience":112,"height":4,"weight":60}"#;
//! let pikachu: Pokemon = serde_json::from_str(json).unwrap();
//! assert_eq!(pikachu.name, "pikachu");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use types::*;
