//! Location-area resources.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A location area (`/location-area/{id or name}/`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Numeric id.
    pub id: u32,
    /// Area name, e.g. `"canalave-city-area"`.
    pub name: String,
    /// Parent location.
    #[serde(default)]
    pub location: Option<NamedResource>,
    /// Pokémon that can be encountered in this area.
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of the Pokémon encountered here, in API order.
    pub fn pokemon_names(&self) -> Vec<String> {
        self.pokemon_encounters
            .iter()
            .map(|e| e.pokemon.name.clone())
            .collect()
    }
}

/// One Pokémon that appears in a location area.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The Pokémon.
    pub pokemon: NamedResource,
}
