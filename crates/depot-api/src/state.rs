//! Application state shared by every handler.
//!
//! Store and signer clients are built once at startup and injected here; the
//! lifecycle services never reach for globals.

use crate::services::{AssetLifecycle, AssetReservation, CapabilityIssuer, ReservationPolicy};
use depot_core::Config;
use depot_db::AssetStore;
use depot_storage::ObjectSigner;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn AssetStore>,
    pub reservation: AssetReservation,
    pub lifecycle: AssetLifecycle,
    pub capabilities: CapabilityIssuer,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn AssetStore>, signer: Arc<dyn ObjectSigner>) -> Self {
        let reservation =
            AssetReservation::new(store.clone(), ReservationPolicy::from_config(&config));
        let lifecycle = AssetLifecycle::new(store.clone());
        let capabilities =
            CapabilityIssuer::new(signer, config.object_key_prefix().map(String::from));

        Self {
            config,
            store,
            reservation,
            lifecycle,
            capabilities,
        }
    }
}
