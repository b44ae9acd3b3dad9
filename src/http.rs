// 🌐 Upstream HTTP capability
// "Given a URL, return parsed JSON or fail"

use serde_json::Value;
use tracing::debug;

use crate::error::{PokedexError, Result};

/// Anything that can resolve a URL to a JSON document.
pub trait JsonSource: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value>;
}

/// Blocking reqwest client. Must be built outside of an async runtime.
pub struct HttpJsonSource {
    client: reqwest::blocking::Client,
}

impl HttpJsonSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl JsonSource for HttpJsonSource {
    fn get_json(&self, url: &str) -> Result<Value> {
        debug!(url, "GET");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>()?)
    }
}
