use std::sync::Arc;

use crate::artifacts::{ArtifactRepo, PgArtifactRepo};
use crate::auth::{PgUserRepo, UserRepo};
use crate::config::AppConfig;
use crate::db;
use crate::llm::{ChatCompletionsClient, CompletionClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub artifacts: Arc<dyn ArtifactRepo>,
    pub llm: Arc<dyn CompletionClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await;

        let llm = Arc::new(ChatCompletionsClient::new(config.llm.clone())?) as Arc<dyn CompletionClient>;

        Ok(Self::from_parts(
            config,
            Arc::new(PgUserRepo::new(pool.clone())),
            Arc::new(PgArtifactRepo::new(pool)),
            llm,
        ))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        artifacts: Arc<dyn ArtifactRepo>,
        llm: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            users,
            artifacts,
            llm,
        }
    }
}
