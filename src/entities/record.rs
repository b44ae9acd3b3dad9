// 🗂️ Plain records - what the repository hands back
//
// A PokemonRecord is a row of the `pokemons` table. A PokemonSummary is
// the trimmed-down shape used for list views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: i64,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub height_m: f64,
    pub height_cm: u64,
    pub weight_kg: f64,
    pub sprite: Option<String>,
    pub evolution_url: Option<String>,
    pub location_areas_url: Option<String>,
    pub location_areas: Vec<String>,
    pub description: Option<String>,
    pub is_legendary: bool,

    /// Insert time; None until the record has been stored
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PokemonRecord {
    /// Element match against the stored type list (case-insensitive)
    pub fn has_type(&self, type_name: &str) -> bool {
        let wanted = type_name.trim();
        self.types.iter().any(|t| t.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i64,
    pub name: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub sprite: Option<String>,
}

impl From<PokemonRecord> for PokemonSummary {
    fn from(record: PokemonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            types: record.types,
            abilities: record.abilities,
            height_m: record.height_m,
            weight_kg: record.weight_kg,
            sprite: record.sprite,
        }
    }
}
