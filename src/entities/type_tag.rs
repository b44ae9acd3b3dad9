// 🔥 TypeTag - Elemental type, normalized to lowercase

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capitalize;

/// Elemental type. Two tags are equal when their canonical names are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTag {
    name: String,
}

impl TypeTag {
    pub fn new(name: &str) -> Self {
        TypeTag {
            name: name.trim().to_lowercase(),
        }
    }

    /// Parse one element of a pokemon's `types` list:
    /// `{ "slot": 1, "type": { "name": "electric", "url": "..." } }`
    ///
    /// Returns `None` for elements without a usable name.
    pub fn from_api(element: &Value) -> Option<Self> {
        let name = element.get("type")?.get("name")?.as_str()?;
        let tag = TypeTag::new(name);

        if tag.name.is_empty() {
            return None;
        }

        Some(tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}
