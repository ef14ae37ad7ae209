use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::artifacts::Artifact;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateBlogRequest {
    #[serde(default)]
    pub title: String,
    pub tone: Option<String>,
    pub length: Option<u32>,
    pub keywords: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBlogResponse {
    pub success: bool,
    pub content: String,
    pub blog_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogItem {
    pub id: Uuid,
    pub title: String,
    pub tone: String,
    pub length: i32,
    pub keywords: Option<String>,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Artifact> for BlogItem {
    fn from(a: Artifact) -> Self {
        Self {
            id: a.id,
            title: a.subject,
            tone: a.tone,
            length: a.length,
            keywords: a.details,
            content: a.content,
            created_at: a.created_at,
        }
    }
}
