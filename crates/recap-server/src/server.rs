//! Router assembly and server lifecycle.

use crate::handlers;
use crate::state::AppState;
use crate::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use recap_core::config::BindMode;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8780;

/// Origins allowed to call the API from a browser.
const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://127.0.0.1",
    "https://localhost",
    "https://127.0.0.1",
];

/// The Recap HTTP server.
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new server over the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until shutdown.
    pub async fn run(&self) -> Result<()> {
        let addr = self.bind_address();

        if self.state.config.server.bind != BindMode::Loopback {
            warn!("server binding to {} - the API is reachable from the network", addr);
        }

        let app = self.router();

        info!("starting server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(std::io::Error::other)?;

        Ok(())
    }

    /// Build the router with all routes and layers.
    pub fn router(&self) -> Router {
        let state = self.state.clone();
        let max_body = state.config.upload.max_bytes;
        let cors = state.config.server.cors;

        let mut router = Router::new()
            .route("/health", get(handlers::health::health))
            .route("/stats", get(handlers::health::stats))
            .route("/upload", post(handlers::upload::upload))
            .route("/process/:filename", post(handlers::upload::process))
            .route("/meetings", get(handlers::meetings::list_meetings))
            .route("/meetings/:id", get(handlers::meetings::get_meeting))
            .route(
                "/meetings/:id/regenerate-visual",
                post(handlers::meetings::regenerate_visual),
            )
            .route("/meetings/:id/similar", get(handlers::search::similar_meetings))
            .route("/search", get(handlers::search::search))
            .route("/insights", get(handlers::insights::insights))
            .route(
                "/integrations/calendar",
                post(handlers::integrations::calendar_events),
            )
            .route(
                "/integrations/tasks",
                post(handlers::integrations::task_assignments),
            )
            .route(
                "/integrations/followups",
                post(handlers::integrations::follow_ups),
            )
            .route("/live/start", post(handlers::live::start_session))
            .route("/live/sessions", get(handlers::live::list_sessions))
            .route("/live/:id/chunk", post(handlers::live::process_chunk))
            .route("/live/:id/end", post(handlers::live::end_session))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(DefaultBodyLimit::max(max_body)),
            );

        if cors {
            router = router.layer(Self::cors_layer());
        }

        router
    }

    /// CORS restricted to localhost origins.
    fn cors_layer() -> CorsLayer {
        let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    }

    /// Get the bind address from configuration.
    fn bind_address(&self) -> SocketAddr {
        let ip = match self.state.config.server.bind {
            BindMode::Loopback => [127, 0, 0, 1],
            BindMode::Lan => [0, 0, 0, 0],
        };

        SocketAddr::from((ip, self.state.config.server.port))
    }
}
