use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

/// Opaque, URL-safe asset identifier. Also the record key and the object key suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Persisted status attribute of an asset record.
///
/// Written explicitly on every put. Records that predate the attribute carry no
/// status and are read as `Reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Reserved,
    Uploaded,
}

/// A stored status value outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown asset status: '{0}'")]
pub struct UnknownStatus(pub String);

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Reserved => "reserved",
            AssetStatus::Uploaded => "uploaded",
        }
    }

    /// Decode the persisted status attribute. A missing attribute reads as `Reserved`.
    pub fn from_stored(raw: Option<&str>) -> Result<Self, UnknownStatus> {
        raw.map_or(Ok(AssetStatus::Reserved), str::parse)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserved" => Ok(AssetStatus::Reserved),
            "uploaded" => Ok(AssetStatus::Uploaded),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// The sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub id: AssetId,
    pub status: AssetStatus,
}

impl AssetRecord {
    /// A freshly claimed record.
    pub fn reserved(id: AssetId) -> Self {
        Self {
            id,
            status: AssetStatus::Reserved,
        }
    }

    /// The record after the client confirmed its upload.
    pub fn uploaded(id: AssetId) -> Self {
        Self {
            id,
            status: AssetStatus::Uploaded,
        }
    }
}

/// Lifecycle state as observed by a consistent read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    NotFound,
    Reserved,
    Uploaded,
}

impl From<Option<&AssetRecord>> for AssetState {
    fn from(record: Option<&AssetRecord>) -> Self {
        match record.map(|r| r.status) {
            None => AssetState::NotFound,
            Some(AssetStatus::Reserved) => AssetState::Reserved,
            Some(AssetStatus::Uploaded) => AssetState::Uploaded,
        }
    }
}

/// Response to `POST /asset`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InitiateAssetResponse {
    /// Signed PUT URL, valid for 24 hours
    pub upload_url: String,
    /// Reserved asset id
    pub id: AssetId,
}

/// Response to `GET /asset/{id}` once the upload is confirmed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DownloadUrlResponse {
    /// Signed GET URL
    #[serde(rename = "Download_url")]
    pub download_url: String,
}

/// Body of `PUT /asset/{id}`
///
/// The `Status` key is matched ignoring ASCII case; when several keys match,
/// the last one wins. A missing key or a `null` value leaves the status empty.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct MarkUploadedRequest {
    /// Must be exactly `uploaded`
    #[serde(rename = "Status")]
    pub status: String,
}

impl<'de> Deserialize<'de> for MarkUploadedRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = MarkUploadedRequest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object with a Status key")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut request = MarkUploadedRequest::default();
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("status") {
                        if let Some(status) = map.next_value::<Option<String>>()? {
                            request.status = status;
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(request)
            }
        }

        deserializer.deserialize_map(RequestVisitor)
    }
}

/// Query of `GET /asset/{id}`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadUrlQuery {
    /// Download URL validity in seconds, 1 to 86400 (default 60)
    pub timeout: Option<String>,
}

impl DownloadUrlQuery {
    /// Build from raw query pairs. Only the first `timeout` counts; repeats
    /// and unrelated keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let timeout = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "timeout").then_some(value));
        Self { timeout }
    }
}
