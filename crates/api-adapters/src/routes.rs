//! Route table and middleware stack.

use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the full application router.
///
/// Mount it with `into_make_service_with_connect_info::<SocketAddr>()`:
/// entry creation reads the peer address.
pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/entries/delete", post(handlers::delete_entry))
        .route("/api/entries/hidden", post(handlers::set_hidden))
        .route("/api/entries/pinned", post(handlers::set_pinned))
        .route("/api/entries/export", post(handlers::export_entries))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(cors_policy())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// The board is read from other origins, so any origin may GET or POST.
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
