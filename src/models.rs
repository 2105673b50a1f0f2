use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// List envelope
// ---------------------------------------------------------------------------

/// Wire-format wrapper returned by collection endpoints.  The server nests
/// the records under a named key instead of returning a bare array.
#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintList {
    pub blueprints: Vec<Blueprint>,
}

// ---------------------------------------------------------------------------
// Blueprints
// ---------------------------------------------------------------------------

/// A Cloudcraft blueprint.
///
/// Every field is optional: the server decides which fields a response
/// carries, and absent fields are omitted from serialized output.  The
/// client enforces no required fields; validation is the server's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(rename = "readAccess", skip_serializing_if = "Option::is_none")]
    pub read_access: Option<Vec<String>>,

    #[serde(rename = "writeAccess", skip_serializing_if = "Option::is_none")]
    pub write_access: Option<Vec<String>>,

    // The server uses PascalCase for the two relation keys.
    #[serde(rename = "CreatorId", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(rename = "LastUserId", skip_serializing_if = "Option::is_none")]
    pub last_user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Body of an API failure response (status >= 400).
///
/// Zero-valued when the server sent no decodable body; the HTTP status on
/// the accompanying [`ApiResponse`](crate::ApiResponse) is authoritative
/// either way.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorResponse {
    /// Status code as reported inside the body.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default, rename = "error")]
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}
