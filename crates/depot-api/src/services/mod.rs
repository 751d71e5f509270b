//! Asset lifecycle services: reservation, state machine and capability issuing.

pub mod capability;
pub mod lifecycle;
pub mod reservation;

#[cfg(test)]
pub(crate) mod test_support;

pub use capability::{resolve_download_ttl, CapabilityIssuer};
pub use lifecycle::AssetLifecycle;
pub use reservation::{generate_asset_id, AssetReservation, ReservationError, ReservationPolicy};
