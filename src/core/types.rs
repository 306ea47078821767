use serde::{Deserialize, Serialize};

/// The payload shape a statement is fed to the analyzer under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeType {
    Text,
    Json,
}

impl MimeType {
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(MimeType::Text),
            2 => Some(MimeType::Json),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        match self {
            MimeType::Text => 1,
            MimeType::Json => 2,
        }
    }
}

/// A document as stored and returned to clients: a client-supplied id and
/// the original, unanalyzed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub raw: String,
}

impl Document {
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            raw: raw.into(),
        }
    }
}

/// A write payload. `statement` is what the analyzer sees; it defaults to
/// `raw` but may differ once a loader has flattened e.g. JSON into a
/// space-separated token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    pub id: String,
    pub raw: String,
    pub statement: String,
    pub mime: MimeType,
}

impl DocRequest {
    pub fn new(id: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        DocRequest {
            id: id.into(),
            statement: raw.clone(),
            raw,
            mime: MimeType::Text,
        }
    }

    pub fn with_statement(
        id: impl Into<String>,
        raw: impl Into<String>,
        statement: impl Into<String>,
        mime: MimeType,
    ) -> Self {
        DocRequest {
            id: id.into(),
            raw: raw.into(),
            statement: statement.into(),
            mime,
        }
    }
}
