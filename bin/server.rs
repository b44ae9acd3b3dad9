// Pokedex - Web Server
// Search page + JSON API with Axum

use anyhow::Context;
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use pokedex::{
    logging, open_pokedex, Config, HttpJsonSource, Pokedex, PokedexError, PokedexPage,
    PokemonRecord, PokemonSummary,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    pokedex: Arc<Pokedex<HttpJsonSource>>,
    list_limit: u32,
    rank_limit: u32,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                data: Some(data),
                error: None,
            }),
        )
            .into_response()
    }

    fn fail(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                success: false,
                data: None,
                error: Some(message.into()),
            }),
        )
            .into_response()
    }
}

fn internal_error(context: &str, e: PokedexError) -> Response {
    error!(error = %e, "{}", context);
    ApiResponse::<()>::fail(StatusCode::INTERNAL_SERVER_ERROR, context)
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(rename = "pokemonName")]
    pokemon_name: Option<String>,
}

#[derive(Deserialize)]
struct LimitParams {
    limit: Option<u32>,
}

// ============================================================================
// Page
// ============================================================================

/// GET /?pokemonName=... - Search page
async fn serve_index(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(identifier) = PokedexPage::requested_identifier(params.pokemon_name.as_deref()) else {
        return render(PokedexPage::empty());
    };

    let pokedex = state.pokedex.clone();
    let lookup_id = identifier.clone();
    let lookup = tokio::task::spawn_blocking(move || pokedex.fetch_and_store(&lookup_id)).await;

    match lookup {
        Ok(Ok(Some(pokemon))) => render(PokedexPage::found(&identifier, &pokemon)),
        Ok(Ok(None)) => render(PokedexPage::not_found(&identifier)),
        Ok(Err(e)) => {
            error!(identifier = %identifier, error = %e, "Lookup failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Pokedex store unavailable</h1>")).into_response()
        }
        Err(e) => {
            error!(identifier = %identifier, error = %e, "Lookup task panicked");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn render(page: PokedexPage) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Response {
    ApiResponse::ok("OK")
}

/// GET /api/pokemon?limit= - Stored pokemon by id
async fn list_pokemon(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Response {
    let limit = params.limit.unwrap_or(state.list_limit);

    match state.pokedex.repository().and_then(|repo| repo.list(limit)) {
        Ok(records) => ApiResponse::ok(summaries(records)),
        Err(e) => internal_error("Error listing pokemon", e),
    }
}

/// GET /api/pokemon/:id - One stored pokemon
async fn get_pokemon(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.pokedex.repository().and_then(|repo| repo.get_by_id(id)) {
        Ok(Some(record)) => ApiResponse::ok(record),
        Ok(None) => ApiResponse::<PokemonRecord>::fail(
            StatusCode::NOT_FOUND,
            format!("No stored pokemon with id {}", id),
        ),
        Err(e) => internal_error("Error getting pokemon", e),
    }
}

/// DELETE /api/pokemon/:id - Remove a stored pokemon
async fn delete_pokemon(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.pokedex.repository().and_then(|repo| repo.delete(id)) {
        Ok(deleted) => ApiResponse::ok(deleted),
        Err(e) => internal_error("Error deleting pokemon", e),
    }
}

/// GET /api/types/:type - Stored pokemon of one type
async fn pokemon_by_type(State(state): State<AppState>, Path(type_name): Path<String>) -> Response {
    match state.pokedex.repository().and_then(|repo| repo.get_by_type(&type_name)) {
        Ok(records) => ApiResponse::ok(summaries(records)),
        Err(e) => internal_error("Error filtering pokemon by type", e),
    }
}

/// GET /api/rank?limit= - Ranked by height + weight
async fn rank_pokemon(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Response {
    let limit = params.limit.unwrap_or(state.rank_limit);

    match state.pokedex.repository().and_then(|repo| repo.rank_by_stats(limit)) {
        Ok(records) => ApiResponse::ok(summaries(records)),
        Err(e) => internal_error("Error ranking pokemon", e),
    }
}

/// GET /api/count - Number of stored pokemon
async fn count_pokemon(State(state): State<AppState>) -> Response {
    match state.pokedex.repository().and_then(|repo| repo.count()) {
        Ok(count) => ApiResponse::ok(count),
        Err(e) => internal_error("Error counting pokemon", e),
    }
}

fn summaries(records: Vec<PokemonRecord>) -> Vec<PokemonSummary> {
    records.into_iter().map(PokemonSummary::from).collect()
}

// ============================================================================
// Main Server
// ============================================================================

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Blocking HTTP client and SQLite store are built before the runtime starts
    let pokedex = open_pokedex(&config).context("Database connection failed")?;
    info!(path = %config.database_path.display(), "Database opened");

    let state = AppState {
        pokedex: Arc::new(pokedex),
        list_limit: config.list_limit,
        rank_limit: config.rank_limit,
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(serve(state, config.bind_addr))
}

async fn serve(state: AppState, addr: String) -> anyhow::Result<()> {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/:id", get(get_pokemon).delete(delete_pokemon))
        .route("/types/:type", get(pokemon_by_type))
        .route("/rank", get(rank_pokemon))
        .route("/count", get(count_pokemon))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .with_state(state)
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new("web"))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("API: http://{}/api/pokemon", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped")?;

    Ok(())
}
