//! Pokémon resources.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A Pokémon (`/pokemon/{id or name}/`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National dex number.
    pub id: u32,
    /// Lower-case name, e.g. `"pikachu"`.
    pub name: String,
    /// Experience gained by defeating it. Null for some event forms.
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    /// Base stats.
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Types, ordered by slot.
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    /// Type names ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<&PokemonType> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// A base stat value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value of the stat.
    pub base_stat: u32,
    /// Effort points awarded.
    #[serde(default)]
    pub effort: u32,
    /// The stat, e.g. `"hp"`.
    pub stat: NamedResource,
}

/// A type slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// 1 for the primary type, 2 for the secondary.
    #[serde(default)]
    pub slot: u8,
    /// The type, e.g. `"electric"`.
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULBASAUR: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "base_experience": 64,
        "height": 7,
        "weight": 69,
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
        ],
        "types": [
            { "slot": 2, "type": { "name": "poison", "url": "" } },
            { "slot": 1, "type": { "name": "grass", "url": "" } }
        ],
        "abilities": []
    }"#;

    #[test]
    fn test_decode() {
        let p: Pokemon = serde_json::from_str(BULBASAUR).unwrap();
        assert_eq!(p.name, "bulbasaur");
        assert_eq!(p.base_experience, Some(64));
        assert_eq!(p.stats.len(), 2);
        assert_eq!(p.stats[0].stat.name, "hp");
    }

    #[test]
    fn test_type_names_sorted_by_slot() {
        let p: Pokemon = serde_json::from_str(BULBASAUR).unwrap();
        assert_eq!(p.type_names(), vec!["grass", "poison"]);
    }

    #[test]
    fn test_null_base_experience() {
        let p: Pokemon =
            serde_json::from_str(r#"{"id": 10001, "name": "deoxys-attack", "base_experience": null}"#).unwrap();
        assert_eq!(p.base_experience, None);
    }
}
