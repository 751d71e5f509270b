use crate::handlers::assets;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// `/asset` accepts POST only; `/asset/{id}` accepts GET and PUT. Any other
/// method, HEAD included, gets a 405 listing the allowed ones.
pub(super) fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/asset",
            post(assets::initiate_asset).fallback(assets::collection_method_not_allowed),
        )
        .route(
            "/asset/{id}",
            get(assets::get_download_url)
                .head(assets::item_method_not_allowed)
                .put(assets::mark_uploaded)
                .fallback(assets::item_method_not_allowed),
        )
}
