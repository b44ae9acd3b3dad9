// Entity Models
// Value objects and the Pokemon entity built from raw PokeAPI JSON
//
// Each value object:
// - Normalizes on construction (lowercase type names, trimmed abilities)
// - Parses its own API element shape and skips malformed elements
// - Derives display strings instead of storing them

pub mod ability_tag;
pub mod pokemon;
pub mod record;
pub mod stats;
pub mod type_tag;

pub use ability_tag::AbilityTag;
pub use pokemon::Pokemon;
pub use record::{PokemonRecord, PokemonSummary};
pub use stats::Stats;
pub use type_tag::TypeTag;

use serde_json::Value;

/// Uppercase the first character, leave the rest untouched
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lenient integer read: numbers (floats truncated) and numeric strings
pub(crate) fn json_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
