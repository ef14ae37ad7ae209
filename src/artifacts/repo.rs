use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Artifact, ArtifactKind, NewArtifact};

/// Owner-scoped access to generated artifacts. Every read and delete is keyed by
/// the owner so one user can never see or remove another user's artifacts.
#[async_trait]
pub trait ArtifactRepo: Send + Sync {
    async fn insert(&self, new: NewArtifact) -> anyhow::Result<Artifact>;

    /// Most recent first.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: ArtifactKind,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Artifact>>;

    async fn list_ids_by_user(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<Vec<Uuid>>;

    async fn get(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<Option<Artifact>>;

    /// Returns false when nothing owned by `user_id` matched.
    async fn delete(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<bool>;

    async fn clear(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgArtifactRepo {
    db: PgPool,
}

impl PgArtifactRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArtifactRepo for PgArtifactRepo {
    async fn insert(&self, new: NewArtifact) -> anyhow::Result<Artifact> {
        let row = sqlx::query_as::<_, Artifact>(
            r#"
            INSERT INTO artifacts (id, user_id, kind, subject, tone, length, details, content)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, subject, tone, length, details, content, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.kind.as_str())
        .bind(&new.subject)
        .bind(&new.tone)
        .bind(new.length)
        .bind(&new.details)
        .bind(&new.content)
        .fetch_one(&self.db)
        .await
        .context("insert artifact")?;
        Ok(row)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: ArtifactKind,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Artifact>> {
        let rows = sqlx::query_as::<_, Artifact>(
            r#"
            SELECT id, user_id, subject, tone, length, details, content, created_at
              FROM artifacts
             WHERE user_id = $1 AND kind = $2
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list artifacts by user")?;
        Ok(rows)
    }

    async fn list_ids_by_user(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
              FROM artifacts
             WHERE user_id = $1 AND kind = $2
             ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_all(&self.db)
        .await
        .context("list artifact ids by user")?;
        Ok(ids)
    }

    async fn get(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<Option<Artifact>> {
        let row = sqlx::query_as::<_, Artifact>(
            r#"
            SELECT id, user_id, subject, tone, length, details, content, created_at
              FROM artifacts
             WHERE id = $1 AND user_id = $2 AND kind = $3
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(&self.db)
        .await
        .context("get artifact")?;
        Ok(row)
    }

    async fn delete(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM artifacts WHERE id = $1 AND user_id = $2 AND kind = $3"#)
            .bind(id)
            .bind(user_id)
            .bind(kind.as_str())
            .execute(&self.db)
            .await
            .context("delete artifact")?;
        Ok(res.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<u64> {
        let res = sqlx::query(r#"DELETE FROM artifacts WHERE user_id = $1 AND kind = $2"#)
            .bind(user_id)
            .bind(kind.as_str())
            .execute(&self.db)
            .await
            .context("clear artifacts")?;
        Ok(res.rows_affected())
    }
}
