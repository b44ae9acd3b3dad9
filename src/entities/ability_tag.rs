// ✨ AbilityTag - Ability name + hidden flag

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityTag {
    name: String,
    is_hidden: bool,
}

impl AbilityTag {
    pub fn new(name: &str, is_hidden: bool) -> Self {
        AbilityTag {
            name: name.trim().to_string(),
            is_hidden,
        }
    }

    /// Parse one element of a pokemon's `abilities` list:
    /// `{ "ability": { "name": "static" }, "is_hidden": false, "slot": 1 }`
    pub fn from_api(element: &Value) -> Option<Self> {
        let name = element.get("ability")?.get("name")?.as_str()?;
        let is_hidden = element
            .get("is_hidden")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let tag = AbilityTag::new(name, is_hidden);
        if tag.name.is_empty() {
            return None;
        }

        Some(tag)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    /// Name with a "(hidden)" marker for hidden abilities
    pub fn display_name(&self) -> String {
        if self.is_hidden {
            format!("{} (hidden)", self.name)
        } else {
            self.name.clone()
        }
    }
}
