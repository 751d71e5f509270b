//! Object key layout.
//!
//! An asset's object lives at `{prefix}/{id}`, or at `{id}` when no prefix is set.

use crate::traits::{SignerError, SignerResult};
use depot_core::AssetId;

/// Object key for an asset.
pub fn object_key(prefix: Option<&str>, id: &AssetId) -> SignerResult<String> {
    let id = id.as_str();
    if id.is_empty() || id.contains('/') || id.contains("..") {
        return Err(SignerError::InvalidKey(id.to_string()));
    }

    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => {
            if prefix.split('/').any(|segment| segment == "..") {
                return Err(SignerError::InvalidKey(prefix.to_string()));
            }
            Ok(format!("{}/{}", prefix, id))
        }
        None => Ok(id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_prefix_is_the_id() {
        let key = object_key(None, &AssetId::from("Zm9vYmFyYmF6cXV4")).unwrap();
        assert_eq!(key, "Zm9vYmFyYmF6cXV4");
    }

    #[test]
    fn test_prefix_slashes_are_normalized() {
        let id = AssetId::from("abc123");
        assert_eq!(object_key(Some("uploads/"), &id).unwrap(), "uploads/abc123");
        assert_eq!(object_key(Some("/a/b/"), &id).unwrap(), "a/b/abc123");
        assert_eq!(object_key(Some(""), &id).unwrap(), "abc123");
    }

    #[test]
    fn test_traversal_is_rejected() {
        assert!(object_key(None, &AssetId::from("")).is_err());
        assert!(object_key(None, &AssetId::from("../etc")).is_err());
        assert!(object_key(None, &AssetId::from("a/b")).is_err());
        assert!(object_key(Some("../up"), &AssetId::from("abc")).is_err());
    }
}
