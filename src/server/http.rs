use crate::media::{MediaResolver, ResolveError, ResolvedStream};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

const SERVICE_NAME: &str = "Fluxo Extractor";

#[derive(Debug, Deserialize)]
struct ExtractRequest {
    url: Option<String>,
}

pub fn router(resolver: MediaResolver) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/extract", post(extract_video))
        .with_state(resolver)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}

/// Body: `{"url": "https://fb.watch/..."}`
async fn extract_video(
    State(resolver): State<MediaResolver>,
    body: Bytes,
) -> Result<Json<ResolvedStream>, ResolveError> {
    // Any body we can't read a url out of is treated as a missing url
    let url = serde_json::from_slice::<ExtractRequest>(&body)
        .ok()
        .and_then(|request| request.url)
        .ok_or_else(|| ResolveError::InvalidRequest("Missing 'url' field".to_string()))?;

    resolver.resolve(&url).await.map(Json)
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ResolveError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            ResolveError::ExtractionFailed(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Could not extract video info", "details": details }),
            ),
            ResolveError::ExtractionTimeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": "Extraction timed out" }),
            ),
            ResolveError::NoUsableStream => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "No processing URL found" }),
            ),
            ResolveError::MalformedMetadata(_) | ResolveError::InternalFault(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        match &self {
            ResolveError::InvalidRequest(_) | ResolveError::NoUsableStream => {
                warn!("Request failed with {}: {}", status, self)
            }
            _ => error!("Request failed with {}: {}", status, self),
        }

        (status, Json(body)).into_response()
    }
}
