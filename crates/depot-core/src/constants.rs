//! Lifecycle and capability constants.

use std::time::Duration;

/// Random bytes drawn per asset id (encodes to a 16 character URL-safe token).
pub const ASSET_ID_BYTES: usize = 12;

/// Total conditional-insert attempts per reservation: the first try plus ten collision retries.
pub const MAX_RESERVATION_ATTEMPTS: u32 = 11;

/// Validity of a signed upload URL. Generous so slow clients can finish their PUT.
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Download URL validity when the client does not ask for one.
pub const DEFAULT_DOWNLOAD_TTL: Duration = Duration::from_secs(60);

/// Shortest download URL validity a client may request.
pub const MIN_DOWNLOAD_TTL: Duration = Duration::from_secs(1);

/// Longest download URL validity a client may request.
pub const MAX_DOWNLOAD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Status value a client must send to confirm an upload.
pub const UPLOADED_STATUS: &str = "uploaded";

/// Methods served on the asset collection.
pub const ASSET_COLLECTION_METHODS: &[&str] = &["POST"];

/// Methods served on a single asset.
pub const ASSET_ITEM_METHODS: &[&str] = &["GET", "PUT"];
