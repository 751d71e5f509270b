//! HTTP surface constants.

use std::time::Duration;

/// Largest request body accepted. The only body is the small status document.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// In-flight request cap across the whole router.
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Budget for the record store round trip in the readiness probe.
pub const READINESS_CHECK_TIMEOUT: Duration = Duration::from_secs(2);
