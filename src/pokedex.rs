// 📟 Pokedex - Fetch-and-store facade
// Orchestrator lookup followed by at most one repository write

use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::db::PokemonRepository;
use crate::entities::Pokemon;
use crate::error::{PokedexError, Result};
use crate::fetch::PokeApiService;
use crate::http::JsonSource;

pub struct Pokedex<S: JsonSource> {
    api: PokeApiService<S>,
    repository: Mutex<PokemonRepository>,
}

impl<S: JsonSource> Pokedex<S> {
    pub fn new(api: PokeApiService<S>, repository: PokemonRepository) -> Self {
        Self {
            api,
            repository: Mutex::new(repository),
        }
    }

    pub fn api(&self) -> &PokeApiService<S> {
        &self.api
    }

    /// Exclusive access to the store for the duration of the guard
    pub fn repository(&self) -> Result<MutexGuard<'_, PokemonRepository>> {
        self.repository
            .lock()
            .map_err(|_| PokedexError::StoreUnavailable("repository lock poisoned".to_string()))
    }

    /// Lookup without touching the store
    pub fn fetch(&self, identifier: &str) -> Option<Pokemon> {
        self.api.get_pokemon(identifier)
    }

    /// Lookup and persist the first sighting of each id.
    ///
    /// A skipped save (id already stored) is not an error. A database error
    /// during the save is logged and the pokemon is still returned; only an
    /// unusable store (poisoned lock) propagates.
    pub fn fetch_and_store(&self, identifier: &str) -> Result<Option<Pokemon>> {
        let Some(pokemon) = self.api.get_pokemon(identifier) else {
            return Ok(None);
        };

        let repository = self.repository()?;
        match repository.save(&pokemon) {
            Ok(true) => {}
            Ok(false) => debug!(id = pokemon.id(), "Pokemon already in store"),
            Err(e) => warn!(id = pokemon.id(), error = %e, "Failed to store pokemon"),
        }

        Ok(Some(pokemon))
    }
}
