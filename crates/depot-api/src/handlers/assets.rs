use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use depot_core::constants::{ASSET_COLLECTION_METHODS, ASSET_ITEM_METHODS, UPLOADED_STATUS};
use depot_core::models::{
    DownloadUrlQuery, DownloadUrlResponse, InitiateAssetResponse, MarkUploadedRequest,
};
use depot_core::{AppError, AssetId};
use std::sync::Arc;

/// Reserve a new asset id and return a signed upload URL for it.
#[utoipa::path(
    post,
    path = "/asset",
    tag = "assets",
    responses(
        (status = 200, description = "Asset reserved", body = InitiateAssetResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "URL signing failed", body = ErrorResponse),
        (status = 503, description = "No asset id could be reserved", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "initiate_asset"))]
pub async fn initiate_asset(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = state.reservation.reserve().await?;
    let upload_url = state.capabilities.issue_upload(&id).await?;

    tracing::info!(asset_id = %id, "Asset initiated");
    Ok(Json(InitiateAssetResponse { upload_url, id }))
}

/// Confirm that the client finished uploading the asset.
///
/// The body is decoded whatever its `Content-Type`.
#[utoipa::path(
    put,
    path = "/asset/{id}",
    tag = "assets",
    params(
        ("id" = String, Path, description = "Asset ID")
    ),
    request_body = MarkUploadedRequest,
    responses(
        (status = 200, description = "Asset marked uploaded"),
        (status = 400, description = "Malformed body or wrong status value", body = ErrorResponse),
        (status = 404, description = "Asset id was never reserved", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Record store failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, body), fields(asset_id = %id, operation = "mark_uploaded"))]
pub async fn mark_uploaded(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, HttpAppError> {
    let request: MarkUploadedRequest = serde_json::from_slice(&body).map_err(AppError::from)?;

    if request.status != UPLOADED_STATUS {
        return Err(AppError::InvalidInput(format!(
            "Invalid value for key Status. Expecting '{}', got: '{}'",
            UPLOADED_STATUS, request.status
        ))
        .into());
    }

    state.lifecycle.mark_uploaded(&AssetId::from(id)).await?;
    Ok(StatusCode::OK)
}

/// Return a signed download URL once the asset's upload is confirmed.
#[utoipa::path(
    get,
    path = "/asset/{id}",
    tag = "assets",
    params(
        ("id" = String, Path, description = "Asset ID"),
        DownloadUrlQuery
    ),
    responses(
        (status = 200, description = "Download URL issued", body = DownloadUrlResponse),
        (status = 202, description = "Asset reserved but upload not confirmed yet", body = ErrorResponse),
        (status = 400, description = "Invalid timeout", body = ErrorResponse),
        (status = 404, description = "Unknown asset id", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Record store or signing failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, pairs), fields(asset_id = %id, operation = "get_download_url"))]
pub async fn get_download_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let query = DownloadUrlQuery::from_pairs(pairs);
    let id = AssetId::from(id);
    let asset_state = state.lifecycle.current_state(&id).await?;
    let download_url = state
        .capabilities
        .issue_download(&id, asset_state, query.timeout.as_deref())
        .await?;

    Ok(Json(DownloadUrlResponse { download_url }))
}

pub async fn collection_method_not_allowed() -> HttpAppError {
    AppError::MethodNotAllowed {
        allowed: ASSET_COLLECTION_METHODS,
    }
    .into()
}

pub async fn item_method_not_allowed() -> HttpAppError {
    AppError::MethodNotAllowed {
        allowed: ASSET_ITEM_METHODS,
    }
    .into()
}
