//! HTTP request handlers for the transform server.
//!
//! Transforms are served at `/run/{name}` with and without a trailing
//! slash, since clients cannot follow redirects on POST.

use crate::registry::TransformRegistry;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router as AxumRouter,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use trx_protocol::{
    decode_request, encode_response, exception_message, run_transform, GENERIC_ERROR_MESSAGE,
};

/// Greeting returned from `/`
pub const INDEX_MESSAGE: &str = "You have reached a Maltego Transform Server.";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registered transforms, immutable once the server is running
    pub registry: Arc<TransformRegistry>,
}

impl AppState {
    /// Wrap a fully built registry
    pub fn new(registry: TransformRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "text/xml")], body).into_response()
}

fn not_found(state: &AppState, name: &str) -> Response {
    info!("No transform found with the name '{}'.", name);
    info!(
        "Available transforms are: {:?}",
        state.registry.names().collect::<Vec<_>>()
    );
    (
        StatusCode::NOT_FOUND,
        format!("No transform found with the name '{}'.", name),
    )
        .into_response()
}

/// GET|POST / - Liveness greeting
async fn index() -> &'static str {
    INDEX_MESSAGE
}

/// GET /run/{name} - Tell the caller to POST
async fn describe_transform(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let name = name.to_lowercase();
    if state.registry.get(&name).is_none() {
        return not_found(&state, &name);
    }

    (
        StatusCode::OK,
        format!(
            "Transform found with name '{}', you will need to send a POST request to run it.",
            name
        ),
    )
        .into_response()
}

/// POST /run/{name} - Decode the request, run the transform, return TRX XML
async fn execute_transform(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let name = name.to_lowercase();
    let Some(transform) = state.registry.get(&name) else {
        return not_found(&state, &name);
    };

    let request = match decode_request(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected request for {}: {}", name, e);
            let mut response = trx_protocol::Response::new();
            response.add_exception(e.to_string());
            return xml_response(StatusCode::BAD_REQUEST, encode_response(&response));
        }
    };

    debug!(
        transform = %name,
        entity_type = %request.entity_type,
        slider = request.slider,
        "Running transform"
    );

    // Handlers are synchronous and may block on I/O
    match tokio::task::spawn_blocking(move || run_transform(transform.as_ref(), &request)).await {
        Ok(xml) => xml_response(StatusCode::OK, xml),
        Err(e) => {
            error!("Transform worker for {} failed: {}", name, e);
            xml_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                exception_message(GENERIC_ERROR_MESSAGE),
            )
        }
    }
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/", get(index).post(index))
        .route("/run/:name", get(describe_transform).post(execute_transform))
        .route("/run/:name/", get(describe_transform).post(execute_transform))
        .with_state(state)
}
