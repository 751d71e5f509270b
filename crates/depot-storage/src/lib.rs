//! Depot Storage Library
//!
//! URL signing over the object store that holds asset bytes.
//!
//! # Object key format
//!
//! An asset's object key is its id, optionally under a configured prefix:
//! `{prefix}/{id}`. Ids must not contain `/` or `..`. Key layout is centralized
//! in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_signer;
pub use keys::object_key;
#[cfg(feature = "storage-s3")]
pub use s3::S3Signer;
pub use traits::{ObjectSigner, SignerError, SignerResult};
