//! PokeAPI response models.
//!
//! Only the fields the shell reads are modelled; serde ignores the rest.
//!
//! - [`LocationArea`]: an area and the Pokémon that can be encountered there
//! - [`Pokemon`]: species details used by `catch` and `inspect`

mod location;
mod pokemon;

pub use location::*;
pub use pokemon::*;

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name, e.g. `"pikachu"`.
    pub name: String,
    /// Canonical URL of the resource.
    #[serde(default)]
    pub url: String,
}
