// 🗄️ Pokemon Repository - SQLite persistence
//
// One row per pokemon id. Rows are written once (first write wins) and
// only ever removed by an explicit delete; there is no update path.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::entities::{Pokemon, PokemonRecord};
use crate::error::{PokedexError, Result};

const SELECT_COLUMNS: &str = "SELECT id, name, types, abilities, height_m, height_cm, weight_kg,
            sprite, evolution_url, location_areas_url, location_areas,
            description, is_legendary, created_at
     FROM pokemons";

pub struct PokemonRepository {
    conn: Connection,
}

impl PokemonRepository {
    /// Open (or create) a file-backed store and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            PokedexError::StoreUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(|e| PokedexError::StoreUnavailable(format!("cannot enable WAL: {}", e)))?;

        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PokedexError::StoreUnavailable(e.to_string()))?;

        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        setup_database(&conn)
            .map_err(|e| PokedexError::StoreUnavailable(format!("cannot create schema: {}", e)))?;

        Ok(Self { conn })
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pokemons WHERE id = ?1",
            [id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// Insert-if-absent. Returns `false` without writing when the id is
    /// already stored, including when a concurrent writer got there first.
    pub fn save(&self, pokemon: &Pokemon) -> Result<bool> {
        if self.exists(pokemon.id())? {
            debug!(id = pokemon.id(), "Already stored, skipping");
            return Ok(false);
        }

        let record = pokemon.to_record();

        let result = self.conn.execute(
            "INSERT INTO pokemons (
                id, name, types, abilities, height_m, height_cm, weight_kg,
                sprite, evolution_url, location_areas_url, location_areas,
                description, is_legendary, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                record.id,
                record.name,
                serde_json::to_string(&record.types)?,
                serde_json::to_string(&record.abilities)?,
                record.height_m,
                record.height_cm,
                record.weight_kg,
                record.sprite,
                record.evolution_url,
                record.location_areas_url,
                serde_json::to_string(&record.location_areas)?,
                record.description,
                record.is_legendary,
                Utc::now().to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                info!(id = record.id, name = %record.name, "Saved pokemon");
                Ok(true)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                debug!(id = record.id, "Lost insert race, row already present");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<PokemonRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                [id],
                row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    /// Rows ordered by id, at most `limit`
    pub fn list(&self, limit: u32) -> Result<Vec<PokemonRecord>> {
        self.query(
            &format!("{} ORDER BY id LIMIT ?1", SELECT_COLUMNS),
            params![limit],
        )
    }

    /// Rows whose stored type list contains `type_name` as an element.
    ///
    /// SQL narrows on the quoted JSON element; the decoded list is then
    /// checked so partial names ("fire" vs "firefly-type") never match.
    pub fn get_by_type(&self, type_name: &str) -> Result<Vec<PokemonRecord>> {
        let wanted = type_name.trim();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%\"{}\"%", escape_like(wanted));
        let rows = self.query(
            &format!("{} WHERE types LIKE ?1 ESCAPE '\\' ORDER BY id", SELECT_COLUMNS),
            params![pattern],
        )?;

        Ok(rows.into_iter().filter(|r| r.has_type(wanted)).collect())
    }

    /// Succeeds whether or not the row existed
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM pokemons WHERE id = ?1", [id])?;

        debug!(id, removed, "Delete");
        Ok(true)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pokemons", [], |row| row.get(0))?;

        Ok(count)
    }

    /// Rows ordered by height_m + weight_kg, largest first
    pub fn rank_by_stats(&self, limit: u32) -> Result<Vec<PokemonRecord>> {
        self.query(
            &format!(
                "{} ORDER BY (height_m + weight_kg) DESC, id ASC LIMIT ?1",
                SELECT_COLUMNS
            ),
            params![limit],
        )
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<PokemonRecord>> {
        let mut stmt = self.conn.prepare(sql)?;

        let records = stmt
            .query_map(params, row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

pub fn setup_database(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS pokemons (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            types TEXT NOT NULL,
            abilities TEXT NOT NULL,
            height_m REAL NOT NULL,
            height_cm INTEGER NOT NULL,
            weight_kg REAL NOT NULL,
            sprite TEXT,
            evolution_url TEXT,
            location_areas_url TEXT,
            location_areas TEXT NOT NULL,
            description TEXT,
            is_legendary INTEGER NOT NULL DEFAULT 0,
            created_at TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_pokemons_name ON pokemons(name)",
        [],
    )?;

    Ok(())
}

fn row_to_record(row: &Row) -> rusqlite::Result<PokemonRecord> {
    let types: String = row.get(2)?;
    let abilities: String = row.get(3)?;
    let location_areas: String = row.get(10)?;
    let created_at: Option<String> = row.get(13)?;

    Ok(PokemonRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        types: serde_json::from_str(&types).unwrap_or_default(),
        abilities: serde_json::from_str(&abilities).unwrap_or_default(),
        height_m: row.get(4)?,
        height_cm: row.get(5)?,
        weight_kg: row.get(6)?,
        sprite: row.get(7)?,
        evolution_url: row.get(8)?,
        location_areas_url: row.get(9)?,
        location_areas: serde_json::from_str(&location_areas).unwrap_or_default(),
        description: row.get(11)?,
        is_legendary: row.get(12)?,
        created_at: created_at
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
    })
}

/// Escape LIKE wildcards so the pattern matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
