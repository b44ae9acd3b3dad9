// 🖥️ Pokedex page - what the search screen shows
//
// Three states: nothing searched yet, searched but not found, found.
// Rendering goes through askama, which HTML-escapes every value.

use askama::Template;

use crate::entities::Pokemon;

pub const SEARCH_PROMPT: &str = "Search a Pokemon";
pub const NOT_FOUND: &str = "Pokemon Not Found";
const PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub id: &'static str,
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn new(id: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            id,
            label,
            value: value.into(),
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "index.html")]
pub struct PokedexPage {
    pub query: String,
    pub title: String,
    pub sprite: Option<String>,
    pub message: Option<&'static str>,
    pub rows: Vec<InfoRow>,
}

impl PokedexPage {
    /// Turn the raw `pokemonName` parameter into the identifier to look up.
    /// Absent or blank means nothing was searched.
    pub fn requested_identifier(param: Option<&str>) -> Option<String> {
        param
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn empty() -> Self {
        Self::placeholder(String::new(), SEARCH_PROMPT)
    }

    pub fn not_found(query: &str) -> Self {
        Self::placeholder(query.to_string(), NOT_FOUND)
    }

    pub fn found(query: &str, pokemon: &Pokemon) -> Self {
        let stats = pokemon.stats();
        let or_dash = |v: String| if v.is_empty() { "-".to_string() } else { v };

        let rows = vec![
            InfoRow::new("species", "Species:", format!("#{} {}", pokemon.id(), pokemon.name())),
            InfoRow::new("type", "Type:", or_dash(pokemon.type_names().join(", "))),
            InfoRow::new("abilities", "Abilities:", or_dash(pokemon.ability_names().join(", "))),
            InfoRow::new(
                "height",
                "Height:",
                format!("{:.1} m ({} cm)", stats.height_meters(), stats.height_centimeters()),
            ),
            InfoRow::new("weight", "Weight:", format!("{:.1} kg", stats.weight_kilograms())),
            InfoRow::new("location", "Location Areas:", or_dash(pokemon.location_areas().join(", "))),
            InfoRow::new("bio", "Description:", pokemon.description().unwrap_or("-")),
            InfoRow::new("legendary", "Legendary:", if pokemon.is_legendary() { "Yes" } else { "No" }),
        ];

        Self {
            query: query.to_string(),
            title: format!("Pokedex - {}", pokemon.name()),
            sprite: pokemon.sprite().map(str::to_string),
            message: None,
            rows,
        }
    }

    fn placeholder(query: String, message: &'static str) -> Self {
        let rows = [
            ("species", "Species:"),
            ("type", "Type:"),
            ("abilities", "Abilities:"),
            ("height", "Height:"),
            ("weight", "Weight:"),
            ("location", "Location Areas:"),
            ("bio", "Description:"),
        ]
        .into_iter()
        .map(|(id, label)| InfoRow::new(id, label, PLACEHOLDER))
        .collect();

        Self {
            query,
            title: "Pokedex".to_string(),
            sprite: None,
            message: Some(message),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pikachu() -> Pokemon {
        Pokemon::from_api_data(&json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [{ "type": { "name": "electric" } }],
            "abilities": [
                { "ability": { "name": "static" }, "is_hidden": false },
                { "ability": { "name": "lightning-rod" }, "is_hidden": true }
            ],
            "sprites": { "front_default": "https://img.test/25.png" },
            "location_areas": ["viridian-forest-area", "power-plant-area"]
        }))
        .unwrap()
    }

    fn row<'a>(page: &'a PokedexPage, id: &str) -> &'a str {
        &page.rows.iter().find(|r| r.id == id).unwrap().value
    }

    #[test]
    fn test_requested_identifier() {
        assert_eq!(PokedexPage::requested_identifier(None), None);
        assert_eq!(PokedexPage::requested_identifier(Some("   ")), None);
        assert_eq!(
            PokedexPage::requested_identifier(Some(" pikachu ")),
            Some("pikachu".to_string())
        );
    }

    #[test]
    fn test_empty_state() {
        let page = PokedexPage::empty();
        assert_eq!(page.message, Some(SEARCH_PROMPT));
        assert!(page.rows.iter().all(|r| r.value == "..."));

        let html = page.render().unwrap();
        assert!(html.contains(SEARCH_PROMPT));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_not_found_state() {
        let html = PokedexPage::not_found("doesnotexist123").render().unwrap();
        assert!(html.contains(NOT_FOUND));
        assert!(html.contains("doesnotexist123"));
    }

    #[test]
    fn test_found_state() {
        let page = PokedexPage::found("pikachu", &pikachu());

        assert_eq!(page.message, None);
        assert_eq!(row(&page, "species"), "#25 Pikachu");
        assert_eq!(row(&page, "type"), "Electric");
        assert_eq!(row(&page, "abilities"), "static, lightning-rod (hidden)");
        assert_eq!(row(&page, "height"), "0.4 m (40 cm)");
        assert_eq!(row(&page, "weight"), "6.0 kg");
        assert_eq!(row(&page, "location"), "viridian-forest-area, power-plant-area");
        assert_eq!(row(&page, "bio"), "-");
        assert_eq!(row(&page, "legendary"), "No");

        let html = page.render().unwrap();
        assert!(html.contains("<img"));
        assert!(html.contains("25.png"));
        assert!(html.contains("Electric"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = PokedexPage::not_found("<script>alert(1)</script>").render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
