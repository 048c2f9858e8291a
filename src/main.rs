//! TagHub Backend
//!
//! A REST backend for tag management on a content platform, with MongoDB
//! persistence behind an injected store trait.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod paging;
mod social;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::store::TagStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TagStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TagHub Backend");
    tracing::info!("MongoDB URI: {}", config.mongo_uri);
    tracing::info!("Database: {}", config.db_name);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (TAGHUB_API_PSK). Authentication is disabled!");
    }

    // Connect to the document store
    let store = db::init_database(&config).await?;

    // Create application state
    let state = AppState {
        store: Arc::new(store),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Tags
        .route("/tags", get(api::list_tags))
        .route("/tags", post(api::create_tag))
        .route("/tags/random", get(api::random_tag))
        .route("/tags/random-batch", get(api::random_tags))
        .route("/tags/search", get(api::search_tags))
        .route("/tags/{tagId}", get(api::get_tag))
        // Posts by tag
        .route("/tags/by-name/{name}/posts", get(api::tag_posts))
        // Relations
        .route("/tags/{tagId}/follow", put(api::follow_tag))
        .route("/tags/{tagId}/block", put(api::block_tag))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
