// Pokedex - Core Library
// Exposes all modules for use in CLI, web server, and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod http;
pub mod logging;
pub mod page;
pub mod pokedex;

// Re-export commonly used types
pub use config::Config;
pub use db::{setup_database, PokemonRepository};
pub use entities::{
    AbilityTag, Pokemon, PokemonRecord, PokemonSummary, Stats, TypeTag,
};
pub use error::{PokedexError, Result};
pub use fetch::{location_area_names, merge_enrichment, PokeApiService, DEFAULT_BASE_URL};
pub use http::{HttpJsonSource, JsonSource};
pub use page::PokedexPage;
pub use pokedex::Pokedex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire up the production pokedex: blocking HTTP client + file-backed store.
///
/// Call this outside of any async runtime; the blocking client owns its own.
pub fn open_pokedex(config: &Config) -> Result<Pokedex<HttpJsonSource>> {
    let api = PokeApiService::new(HttpJsonSource::new()?, &config.api_base_url);
    let repository = PokemonRepository::open(&config.database_path)?;

    Ok(Pokedex::new(api, repository))
}
