//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use depot_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Depot API",
        version = "0.1.0",
        description = "Asset lifecycle service. Clients reserve an asset id, upload the bytes straight to object storage through a signed URL, confirm the upload, then fetch time-limited signed download URLs."
    ),
    paths(
        handlers::assets::initiate_asset,
        handlers::assets::mark_uploaded,
        handlers::assets::get_download_url,
    ),
    components(schemas(
        models::AssetId,
        models::InitiateAssetResponse,
        models::DownloadUrlResponse,
        models::MarkUploadedRequest,
        error::ErrorResponse,
    )),
    tags(
        (name = "assets", description = "Asset reservation, upload confirmation and download")
    )
)]
pub struct ApiDoc;
