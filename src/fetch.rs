// 🔎 Fetch Orchestrator - PokeAPI lookups
//
// One lookup = up to three sequential GETs:
// 1. pokemon/<identifier>            (required - failure means not found)
// 2. species URL from the payload    (optional - flavor text, legendary flag)
// 3. location_area_encounters URL    (optional - location area names)
//
// Enrichment failures are logged and swallowed; the page still renders
// the core facts when the auxiliary endpoints are down.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::entities::Pokemon;
use crate::http::JsonSource;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

pub struct PokeApiService<S: JsonSource> {
    source: S,
    base_url: String,
}

impl<S: JsonSource> PokeApiService<S> {
    pub fn new(source: S, base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { source, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a pokemon by name or numeric id (names are case-insensitive).
    ///
    /// Returns `None` when the identifier is blank, the primary fetch fails,
    /// or the payload is not a JSON object.
    pub fn get_pokemon(&self, identifier: &str) -> Option<Pokemon> {
        let url = self.resource_url("pokemon", identifier)?;

        let primary = match self.source.get_json(&url) {
            Ok(data) => data,
            Err(e) => {
                info!(identifier, error = %e, "Pokemon not found");
                return None;
            }
        };

        let species = string_field(&primary, &["species", "url"])
            .and_then(|species_url| self.enrichment(&species_url, "species"));

        let areas = string_field(&primary, &["location_area_encounters"])
            .filter(|url| !url.trim().is_empty())
            .and_then(|encounters_url| self.enrichment(&encounters_url, "encounters"))
            .map(|encounters| location_area_names(&encounters))
            .unwrap_or_default();

        let composed = merge_enrichment(primary, species.as_ref(), areas);

        match Pokemon::from_api_data(&composed) {
            Ok(pokemon) => {
                info!(id = pokemon.id(), name = pokemon.name(), "Fetched pokemon");
                Some(pokemon)
            }
            Err(e) => {
                warn!(identifier, error = %e, "Unusable pokemon payload");
                None
            }
        }
    }

    /// Raw species resource by name or id
    pub fn get_pokemon_species(&self, identifier: &str) -> Option<Value> {
        let url = self.resource_url("pokemon-species", identifier)?;

        match self.source.get_json(&url) {
            Ok(data) => Some(data),
            Err(e) => {
                info!(identifier, error = %e, "Species not found");
                None
            }
        }
    }

    fn resource_url(&self, resource: &str, identifier: &str) -> Option<String> {
        let identifier = identifier.trim().to_lowercase();
        if identifier.is_empty() {
            return None;
        }

        Some(format!(
            "{}{}/{}",
            self.base_url,
            resource,
            urlencoding::encode(&identifier)
        ))
    }

    /// Best-effort auxiliary fetch
    fn enrichment(&self, url: &str, what: &str) -> Option<Value> {
        match self.source.get_json(url) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(url, error = %e, "Skipping {} enrichment", what);
                None
            }
        }
    }
}

fn string_field(data: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(data, |node, key| node.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Compose the record handed to `Pokemon::from_api_data`.
///
/// The species' `flavor_text_entries` (and `is_legendary`, when the species
/// carries it) replace the primary fields; `areas` becomes `location_areas`.
/// A non-object primary payload is returned unchanged.
pub fn merge_enrichment(primary: Value, species: Option<&Value>, areas: Vec<String>) -> Value {
    let mut composed: Map<String, Value> = match primary {
        Value::Object(map) => map,
        other => return other,
    };

    if let Some(species) = species {
        if let Some(entries) = species.get("flavor_text_entries").filter(|v| v.is_array()) {
            composed.insert("flavor_text_entries".to_string(), entries.clone());
        }
        if let Some(legendary) = species.get("is_legendary").filter(|v| v.is_boolean()) {
            composed.insert("is_legendary".to_string(), legendary.clone());
        }
    }

    composed.insert(
        "location_areas".to_string(),
        Value::Array(areas.into_iter().map(Value::String).collect()),
    );

    Value::Object(composed)
}

/// Area names from an encounters response, first occurrence wins.
///
/// Element shape: `{ "location_area": { "name": "viridian-forest-area", ... }, ... }`
pub fn location_area_names(encounters: &Value) -> Vec<String> {
    let Some(entries) = encounters.as_array() else {
        debug!("Encounters payload is not a list");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(|entry| entry.get("location_area")?.get("name")?.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StaticSource;
    use serde_json::json;

    const BASE: &str = "https://pokeapi.test/api/v2/";
    const SPECIES_URL: &str = "https://pokeapi.test/api/v2/pokemon-species/25/";
    const ENCOUNTERS_URL: &str = "https://pokeapi.test/api/v2/pokemon/25/encounters";

    fn pikachu() -> Value {
        json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [{ "slot": 1, "type": { "name": "electric" } }],
            "abilities": [{ "ability": { "name": "static" }, "is_hidden": false }],
            "sprites": { "front_default": "https://img.test/25.png" },
            "species": { "name": "pikachu", "url": SPECIES_URL },
            "location_area_encounters": ENCOUNTERS_URL
        })
    }

    fn species() -> Value {
        json!({
            "is_legendary": false,
            "flavor_text_entries": [
                { "flavor_text": "When several of\nthese POKéMON\ngather, their\u{c}electricity could\nbuild and cause\nlightning storms.",
                  "language": { "name": "en" }, "version": { "name": "red" } }
            ]
        })
    }

    fn encounter(area: &str) -> Value {
        json!({ "location_area": { "name": area, "url": "https://pokeapi.test/x" }, "version_details": [] })
    }

    fn service(source: StaticSource) -> PokeApiService<StaticSource> {
        PokeApiService::new(source, BASE)
    }

    #[test]
    fn test_pikachu_end_to_end() {
        let source = StaticSource::new()
            .with("https://pokeapi.test/api/v2/pokemon/pikachu", pikachu())
            .with(SPECIES_URL, species())
            .with(ENCOUNTERS_URL, json!([encounter("viridian-forest-area")]));
        let api = service(source);

        let pokemon = api.get_pokemon("Pikachu").unwrap();

        assert_eq!(pokemon.id(), 25);
        assert_eq!(pokemon.stats().height_meters(), 0.4);
        assert_eq!(pokemon.stats().weight_kilograms(), 6.0);
        assert_eq!(pokemon.type_names(), vec!["Electric"]);
        assert_eq!(
            pokemon.description(),
            Some("When several of these POKéMON gather, their electricity could build and cause lightning storms.")
        );
        assert_eq!(pokemon.location_areas(), &["viridian-forest-area".to_string()]);
    }

    #[test]
    fn test_identifier_is_lowercased_and_trimmed() {
        let api = service(StaticSource::new());

        assert!(api.get_pokemon("  MewTwo ").is_none());
        assert_eq!(
            api.source.requests(),
            vec!["https://pokeapi.test/api/v2/pokemon/mewtwo"]
        );
    }

    #[test]
    fn test_unknown_identifier_is_not_found() {
        let api = service(StaticSource::new());

        assert!(api.get_pokemon("doesnotexist123").is_none());
        assert_eq!(api.source.requests().len(), 1);
    }

    #[test]
    fn test_blank_identifier_makes_no_request() {
        let api = service(StaticSource::new());

        assert!(api.get_pokemon("   ").is_none());
        assert!(api.source.requests().is_empty());
    }

    #[test]
    fn test_non_object_payload_is_not_found() {
        let source = StaticSource::new().with("https://pokeapi.test/api/v2/pokemon/7", json!("squirtle"));
        let api = service(source);

        assert!(api.get_pokemon("7").is_none());
    }

    #[test]
    fn test_failed_enrichment_still_returns_pokemon() {
        let source = StaticSource::new().with("https://pokeapi.test/api/v2/pokemon/25", pikachu());
        let api = service(source);

        let pokemon = api.get_pokemon("25").unwrap();

        assert_eq!(pokemon.name(), "Pikachu");
        assert_eq!(pokemon.description(), None);
        assert!(pokemon.location_areas().is_empty());
        assert_eq!(api.source.requests().len(), 3);
    }

    #[test]
    fn test_no_links_means_single_request() {
        let mut data = pikachu();
        let map = data.as_object_mut().unwrap();
        map.remove("species");
        map.insert("location_area_encounters".to_string(), json!(""));

        let source = StaticSource::new().with("https://pokeapi.test/api/v2/pokemon/pikachu", data);
        let api = service(source);

        let pokemon = api.get_pokemon("pikachu").unwrap();
        assert_eq!(pokemon.description(), None);
        assert_eq!(api.source.requests().len(), 1);
    }

    #[test]
    fn test_species_legendary_flag_is_merged() {
        let mut legendary = species();
        legendary["is_legendary"] = json!(true);

        let composed = merge_enrichment(pikachu(), Some(&legendary), vec![]);
        assert_eq!(composed["is_legendary"], json!(true));
        assert!(composed["flavor_text_entries"].is_array());
        assert_eq!(composed["location_areas"], json!([]));
    }

    #[test]
    fn test_merge_leaves_primary_fields_intact() {
        let composed = merge_enrichment(pikachu(), None, vec!["route-1".to_string()]);

        assert_eq!(composed["id"], json!(25));
        assert_eq!(composed["location_areas"], json!(["route-1"]));
        assert!(composed.get("flavor_text_entries").is_none());
    }

    #[test]
    fn test_location_areas_deduplicated_in_order() {
        let encounters = json!([
            encounter("viridian-forest-area"),
            encounter("power-plant-area"),
            encounter("viridian-forest-area"),
            { "location_area": { "name": "" } },
            { "version_details": [] },
            encounter("route-2-area"),
            encounter("power-plant-area"),
        ]);

        assert_eq!(
            location_area_names(&encounters),
            vec!["viridian-forest-area", "power-plant-area", "route-2-area"]
        );
    }

    #[test]
    fn test_location_areas_non_list_is_empty() {
        assert!(location_area_names(&json!({ "detail": "Not found" })).is_empty());
    }

    #[test]
    fn test_species_lookup() {
        let source = StaticSource::new().with("https://pokeapi.test/api/v2/pokemon-species/pikachu", species());
        let api = service(source);

        assert!(api.get_pokemon_species("PIKACHU").is_some());
        assert!(api.get_pokemon_species("missingno").is_none());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = PokeApiService::new(StaticSource::new(), "https://pokeapi.test/api/v2");
        assert_eq!(api.base_url(), "https://pokeapi.test/api/v2/");
    }
}
