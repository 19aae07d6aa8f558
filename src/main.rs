use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use idle_logout_api::session::{IdleSessionTracker, MemoryUserStore, TrackerConfig};
use idle_logout_api::{AppState, config, handlers, middleware, models::AppConfig};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idle_logout_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load idle-logout configuration
    let app_config = match config::load_config_with_fallback() {
        Ok(config) => {
            tracing::info!("✓ Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::warn!("⚠ Failed to load configuration: {}. Using built-in defaults.", e);
            Arc::new(AppConfig::default())
        }
    };

    // Resolve raw settings into the tracker configuration
    let tracker_config = TrackerConfig::from_raw(
        app_config.session.idle_time.as_deref(),
        app_config.session.idle_message.as_deref(),
    );
    tracing::info!("Idle timeout set to {}s", tracker_config.idle_time_secs);

    let store = Arc::new(MemoryUserStore::new());
    let tracker = IdleSessionTracker::new(store, tracker_config);
    let state = AppState::new(tracker, app_config);

    // Build our application with routes
    let app = Router::new()
        // Health check routes (always available)
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        // Session start for upstream-authenticated users
        .route("/api/v1/auth/login", post(handlers::auth::login))
        // Explicit logout clears the activity record
        .route(
            "/api/v1/auth/logout",
            post(handlers::auth::logout)
                .layer(axum::middleware::from_fn(middleware::auth::auth_middleware)),
        )
        // Protected routes run the idle guard after authentication
        .route(
            "/api/v1/user/profile",
            get(handlers::user::get_profile)
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    middleware::idle::idle_guard,
                ))
                .layer(axum::middleware::from_fn(middleware::auth::auth_middleware)),
        )
        .with_state(state)
        // Add global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("🚀 Starting idle-logout API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
