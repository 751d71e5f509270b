use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Record store backend types
///
/// Defined in core because configuration selects it and the store crate implements it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBackend {
    DynamoDb,
    Postgres,
    Memory,
}

impl FromStr for RecordBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dynamodb" | "dynamo" => Ok(RecordBackend::DynamoDb),
            "postgres" | "postgresql" => Ok(RecordBackend::Postgres),
            "memory" => Ok(RecordBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid record store backend: {}", s)),
        }
    }
}

impl Display for RecordBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RecordBackend::DynamoDb => write!(f, "dynamodb"),
            RecordBackend::Postgres => write!(f, "postgres"),
            RecordBackend::Memory => write!(f, "memory"),
        }
    }
}
