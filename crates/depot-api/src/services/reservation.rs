//! Identifier reservation
//!
//! Ids are independent random draws. A draw is claimed with a conditional insert
//! that only succeeds when no record exists under the key, so the store decides
//! every race; a lost race is a collision and triggers a fresh draw.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use depot_core::constants::{ASSET_ID_BYTES, MAX_RESERVATION_ATTEMPTS};
use depot_core::{AppError, AssetId, AssetRecord, Config};
use depot_db::{AssetStore, PutCondition, RecordStoreError};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Bounds on the collision retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPolicy {
    /// Total conditional inserts, first try included.
    pub max_attempts: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RESERVATION_ATTEMPTS,
            backoff_base: Duration::from_millis(5),
            backoff_max: Duration::from_millis(200),
        }
    }
}

impl ReservationPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.reservation_max_attempts(),
            backoff_base: config.reservation_backoff_base(),
            backoff_max: config.reservation_backoff_max(),
        }
    }

    /// Upper bound of the pause before retry number `retry` (1-based):
    /// `min(max, base * 2^(retry - 1))`.
    pub fn backoff_ceiling(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.backoff_base
            .saturating_mul(1u32 << exponent)
            .min(self.backoff_max)
    }

    /// Full-jitter pause: uniform in `[0, backoff_ceiling(retry)]`.
    fn jittered_backoff(&self, retry: u32) -> Duration {
        let ceiling_ms = self.backoff_ceiling(retry).as_millis() as u64;
        if ceiling_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=ceiling_ms))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    /// Every attempt collided with an existing record.
    #[error("No free asset id after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        #[source]
        last: RecordStoreError,
    },

    /// The store failed for a reason other than a collision. Not retried.
    #[error("Record store rejected the reservation")]
    Store(#[source] RecordStoreError),
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::Exhausted { attempts, last } => AppError::ReservationExhausted {
                attempts,
                message: last.to_string(),
            },
            ReservationError::Store(e) => AppError::ReservationUnavailable(e.to_string()),
        }
    }
}

/// Draw a fresh id: 12 random bytes as unpadded URL-safe base64 (16 characters).
pub fn generate_asset_id() -> AssetId {
    let bytes: [u8; ASSET_ID_BYTES] = rand::random();
    AssetId::new(URL_SAFE_NO_PAD.encode(bytes))
}

/// Claims fresh asset ids in the record store.
#[derive(Clone)]
pub struct AssetReservation {
    store: Arc<dyn AssetStore>,
    policy: ReservationPolicy,
}

impl AssetReservation {
    pub fn new(store: Arc<dyn AssetStore>, policy: ReservationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &ReservationPolicy {
        &self.policy
    }

    /// Claim a previously unused id. The returned id has exactly one record, in
    /// state `Reserved`, written by this call.
    pub async fn reserve(&self) -> Result<AssetId, ReservationError> {
        let mut last_collision = None;

        for attempt in 0..self.policy.max_attempts {
            if attempt > 0 {
                let pause = self.policy.jittered_backoff(attempt);
                if !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
            }

            let id = generate_asset_id();
            let record = AssetRecord::reserved(id.clone());
            match self.store.put(&record, PutCondition::KeyAbsent).await {
                Ok(()) => {
                    tracing::debug!(asset_id = %id, attempts = attempt + 1, "Asset id reserved");
                    return Ok(id);
                }
                Err(e) if e.is_condition_failed() => {
                    tracing::debug!(
                        asset_id = %id,
                        attempt = attempt + 1,
                        "Asset id collision, drawing again"
                    );
                    last_collision = Some(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, attempt = attempt + 1, "Asset id reservation failed");
                    return Err(ReservationError::Store(e));
                }
            }
        }

        tracing::warn!(
            attempts = self.policy.max_attempts,
            "Asset id reservation exhausted its attempts"
        );
        Err(ReservationError::Exhausted {
            attempts: self.policy.max_attempts,
            last: last_collision.unwrap_or_else(|| {
                RecordStoreError::Config("no reservation attempts configured".to_string())
            }),
        })
    }
}
