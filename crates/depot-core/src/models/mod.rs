//! Domain models and HTTP payloads.

pub mod asset;

pub use asset::{
    AssetId, AssetRecord, AssetState, AssetStatus, DownloadUrlQuery, DownloadUrlResponse,
    InitiateAssetResponse, MarkUploadedRequest, UnknownStatus,
};
