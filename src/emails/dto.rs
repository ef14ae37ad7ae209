use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::artifacts::Artifact;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateEmailRequest {
    #[serde(default)]
    pub subject: String,
    pub tone: Option<String>,
    pub length: Option<u32>,
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateEmailResponse {
    pub success: bool,
    pub content: String,
    pub email_id: Uuid,
}

/// Stored email as returned by the history endpoints.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailItem {
    pub id: Uuid,
    pub subject: String,
    pub tone: String,
    pub length: i32,
    pub context: Option<String>,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Artifact> for EmailItem {
    fn from(a: Artifact) -> Self {
        Self {
            id: a.id,
            subject: a.subject,
            tone: a.tone,
            length: a.length,
            context: a.details,
            content: a.content,
            created_at: a.created_at,
        }
    }
}
