use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use cask_gateway::BlobGateway;
use cask_store::BlobStore;
use serde_json::json;

use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<BlobGateway>,
    pub store: Arc<dyn BlobStore>,
}

/// GET /v1/blobs/:name -- fetch a blob.
///
/// The response content type is sniffed from the bytes, not taken from the
/// key's extension.
pub async fn get_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServerResult<Response> {
    let blob = state.gateway.fetch(&name).await?;
    Ok(([(header::CONTENT_TYPE, blob.content_type)], blob.bytes).into_response())
}

/// POST /v1/blobs/:name -- upload a blob from a multipart `file` field.
pub async fn post_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> ServerResult<Json<serde_json::Value>> {
    let bytes = read_upload(multipart).await?;
    state.gateway.store(&name, bytes).await?;
    Ok(Json(json!({
        "message": format!("blob {name} uploaded successfully")
    })))
}

/// PATCH /v1/blobs/:name -- replace an existing blob's content.
pub async fn patch_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
    multipart: Multipart,
) -> ServerResult<Json<serde_json::Value>> {
    let bytes = read_upload(multipart).await?;
    state.gateway.replace(&name, bytes).await?;
    Ok(Json(json!({
        "message": format!("blob {name} updated successfully")
    })))
}

/// DELETE /v1/blobs/:name -- remove a blob.
pub async fn delete_blob(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ServerResult<Json<serde_json::Value>> {
    state.gateway.remove(&name).await?;
    Ok(Json(json!({
        "message": format!("blob {name} deleted successfully")
    })))
}

/// GET /v1/health -- probe the backend.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    match state.store.health_check().await {
        Ok(()) => Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        }))
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            ServerError::Backend(err.to_string()).into_response()
        }
    }
}

/// GET /v1/info -- service identity.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "cask-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Pull the upload bytes out of the multipart body.
///
/// Anything short of a readable `file` field -- decode failure, truncated
/// stream, field missing entirely -- is a [`ServerError::MalformedUpload`],
/// produced here before the gateway is invoked.
async fn read_upload(mut multipart: Multipart) -> ServerResult<Bytes> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::MalformedUpload(e.to_string()))?;
        match field {
            Some(field) if field.name() == Some("file") => {
                return field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::MalformedUpload(e.to_string()));
            }
            Some(_other) => continue,
            None => {
                return Err(ServerError::MalformedUpload(
                    "missing multipart field `file`".into(),
                ));
            }
        }
    }
}
