// 🐾 Pokemon Entity - Normalized view of one PokeAPI record
//
// Built once from the composed JSON record (primary resource + species
// flavor text + resolved location areas) and never mutated afterwards.
// Display strings (type names, ability names) are derived, not stored.

use serde_json::Value;

use super::{capitalize, json_int, AbilityTag, PokemonRecord, Stats, TypeTag};
use crate::error::{PokedexError, Result};

/// Flavor-text version preferred when several English entries exist
const PREFERRED_VERSION: &str = "red";
const ENGLISH: &str = "en";

#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    id: i64,
    name: String,
    types: Vec<TypeTag>,
    abilities: Vec<AbilityTag>,
    stats: Stats,
    sprite: Option<String>,
    evolution_url: Option<String>,
    location_areas_url: Option<String>,
    location_areas: Vec<String>,
    description: Option<String>,
    is_legendary: bool,
}

impl Pokemon {
    /// Build a Pokemon from a pokemon resource, optionally carrying merged-in
    /// `flavor_text_entries` and `location_areas`.
    ///
    /// Field defaults:
    /// - `id` → 0, `name` → "", `height`/`weight` → 0
    /// - `types`/`abilities` → empty; malformed elements are skipped
    /// - `sprites.front_default`, `species.url`, `location_area_encounters` → None
    /// - `location_areas` → empty; `is_legendary` → false
    /// - description → None unless an English flavor text exists
    ///
    /// Fails only when `data` is not a JSON object.
    pub fn from_api_data(data: &Value) -> Result<Self> {
        if !data.is_object() {
            return Err(PokedexError::NotAnObject("pokemon resource"));
        }

        let types = list(data, "types")
            .iter()
            .filter_map(TypeTag::from_api)
            .collect();

        let abilities = list(data, "abilities")
            .iter()
            .filter_map(AbilityTag::from_api)
            .collect();

        let location_areas = list(data, "location_areas")
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        Ok(Pokemon {
            id: data.get("id").and_then(json_int).unwrap_or(0),
            name: capitalize(data.get("name").and_then(Value::as_str).unwrap_or("")),
            types,
            abilities,
            stats: Stats::from_api(data),
            sprite: string_at(data, &["sprites", "front_default"]),
            evolution_url: string_at(data, &["species", "url"]),
            location_areas_url: string_at(data, &["location_area_encounters"]),
            location_areas,
            description: select_description(list(data, "flavor_text_entries")),
            is_legendary: data
                .get("is_legendary")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeTag] {
        &self.types
    }

    pub fn abilities(&self) -> &[AbilityTag] {
        &self.abilities
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn sprite(&self) -> Option<&str> {
        self.sprite.as_deref()
    }

    pub fn evolution_url(&self) -> Option<&str> {
        self.evolution_url.as_deref()
    }

    pub fn location_areas_url(&self) -> Option<&str> {
        self.location_areas_url.as_deref()
    }

    pub fn location_areas(&self) -> &[String] {
        &self.location_areas
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_legendary(&self) -> bool {
        self.is_legendary
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(TypeTag::display_name).collect()
    }

    pub fn ability_names(&self) -> Vec<String> {
        self.abilities.iter().map(AbilityTag::display_name).collect()
    }

    /// Flatten into the persisted-row shape
    pub fn to_record(&self) -> PokemonRecord {
        PokemonRecord {
            id: self.id,
            name: self.name.clone(),
            types: self.type_names(),
            abilities: self.ability_names(),
            height_m: self.stats.height_meters(),
            height_cm: self.stats.height_centimeters(),
            weight_kg: self.stats.weight_kilograms(),
            sprite: self.sprite.clone(),
            evolution_url: self.evolution_url.clone(),
            location_areas_url: self.location_areas_url.clone(),
            location_areas: self.location_areas.clone(),
            description: self.description.clone(),
            is_legendary: self.is_legendary,
            created_at: None,
        }
    }
}

// ============================================================================
// FIELD ACCESS HELPERS
// ============================================================================

fn list<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_at(data: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(data, |node, key| node.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn nested_name<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.get(key)?.get("name")?.as_str()
}

// ============================================================================
// DESCRIPTION SELECTION
// ============================================================================

/// Pick the description among species flavor-text entries.
///
/// Only English entries carrying a text are candidates. The "red" version
/// wins; otherwise the first English entry in source order.
fn select_description(entries: &[Value]) -> Option<String> {
    let english: Vec<(&Value, &str)> = entries
        .iter()
        .filter(|entry| nested_name(entry, "language") == Some(ENGLISH))
        .filter_map(|entry| Some((entry, entry.get("flavor_text")?.as_str()?)))
        .collect();

    let (_, text) = english
        .iter()
        .find(|(entry, _)| nested_name(entry, "version") == Some(PREFERRED_VERSION))
        .or_else(|| english.first())?;

    let cleaned = clean_flavor_text(text);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Control characters become spaces, whitespace runs collapse, ends are trimmed.
///
/// Game flavor text is full of `\n` and form feeds (`\u{c}`).
fn clean_flavor_text(text: &str) -> String {
    let spaced: String = text
        .chars()
        .map(|c| if c.is_ascii_control() { ' ' } else { c })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
