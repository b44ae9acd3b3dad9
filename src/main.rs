use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pokedex::{logging, open_pokedex, Config, Pokemon, PokemonRecord, PokemonSummary};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Look up Pokemon on PokeAPI and keep a local Pokedex")]
#[command(version)]
struct Cli {
    /// SQLite database path (overrides POKEDEX_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a pokemon by name or id and store it
    Lookup {
        identifier: String,
        /// Only display, do not store
        #[arg(long)]
        no_save: bool,
    },
    /// Show a stored pokemon
    Show { id: i64 },
    /// List stored pokemon by id
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Stored pokemon of one type
    ByType { type_name: String },
    /// Stored pokemon ranked by height + weight
    Rank {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Remove a stored pokemon
    Delete { id: i64 },
    /// Number of stored pokemon
    Count,
}

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    let pokedex = open_pokedex(&config).context("Database connection failed")?;

    match cli.command {
        Commands::Lookup { identifier, no_save } => {
            let found = if no_save {
                pokedex.fetch(&identifier)
            } else {
                pokedex.fetch_and_store(&identifier)?
            };

            match found {
                Some(pokemon) => print_pokemon(&pokemon),
                None => println!("❌ Pokemon '{}' not found", identifier),
            }
        }
        Commands::Show { id } => match pokedex.repository()?.get_by_id(id)? {
            Some(record) => print_record(&record),
            None => println!("❌ No stored pokemon with id {}", id),
        },
        Commands::List { limit } => {
            let records = pokedex.repository()?.list(limit.unwrap_or(config.list_limit))?;
            print_summaries(records);
        }
        Commands::ByType { type_name } => {
            let records = pokedex.repository()?.get_by_type(&type_name)?;
            print_summaries(records);
        }
        Commands::Rank { limit } => {
            let records = pokedex
                .repository()?
                .rank_by_stats(limit.unwrap_or(config.rank_limit))?;
            print_summaries(records);
        }
        Commands::Delete { id } => {
            pokedex.repository()?.delete(id)?;
            println!("✓ Deleted pokemon {}", id);
        }
        Commands::Count => {
            println!("{}", pokedex.repository()?.count()?);
        }
    }

    Ok(())
}

fn print_pokemon(pokemon: &Pokemon) {
    print_record(&pokemon.to_record());
}

fn print_record(record: &PokemonRecord) {
    println!("#{} {}", record.id, record.name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Type:        {}", record.types.join(", "));
    println!("Abilities:   {}", record.abilities.join(", "));
    println!("Height:      {:.1} m ({} cm)", record.height_m, record.height_cm);
    println!("Weight:      {:.1} kg", record.weight_kg);
    println!("Legendary:   {}", if record.is_legendary { "yes" } else { "no" });
    if let Some(sprite) = &record.sprite {
        println!("Sprite:      {}", sprite);
    }
    if !record.location_areas.is_empty() {
        println!("Locations:   {}", record.location_areas.join(", "));
    }
    if let Some(description) = &record.description {
        println!("\n{}", description);
    }
}

fn print_summaries(records: Vec<PokemonRecord>) {
    if records.is_empty() {
        println!("(no stored pokemon)");
        return;
    }

    for summary in records.into_iter().map(PokemonSummary::from) {
        println!(
            "{:>5}  {:<14} {:<20} {:>6.1} m {:>7.1} kg",
            summary.id,
            summary.name,
            summary.types.join("/"),
            summary.height_m,
            summary.weight_kg
        );
    }
}
