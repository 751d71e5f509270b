//! Depot API Library
//!
//! HTTP handlers, lifecycle services and application setup for the asset service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;

pub mod error;
pub mod state;

pub use error::ErrorResponse;
