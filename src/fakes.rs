//! In-memory stand-ins for the database and the provider, used by unit and router tests.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    artifacts::{Artifact, ArtifactKind, ArtifactRepo, NewArtifact},
    auth::{jwt::JwtKeys, password::hash_password, CreateUserError, User, UserRepo},
    config::{AppConfig, LlmConfig},
    llm::{CompletionClient, ProviderError},
    state::AppState,
};

#[derive(Default)]
pub struct MemoryUserRepo {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, CreateUserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(CreateUserError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }
}

/// Rows are kept in insertion order; listings walk them newest first.
#[derive(Default)]
pub struct MemoryArtifactRepo {
    rows: Mutex<Vec<(ArtifactKind, Artifact)>>,
    fail_inserts: AtomicBool,
}

impl MemoryArtifactRepo {
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn all(&self, kind: ArtifactKind) -> Vec<Artifact> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, a)| a.clone())
            .collect()
    }
}

#[async_trait]
impl ArtifactRepo for MemoryArtifactRepo {
    async fn insert(&self, new: NewArtifact) -> anyhow::Result<Artifact> {
        anyhow::ensure!(!self.fail_inserts.load(Ordering::SeqCst), "database unavailable");
        let artifact = Artifact {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            subject: new.subject,
            tone: new.tone,
            length: new.length,
            details: new.details,
            content: new.content,
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.lock().unwrap().push((new.kind, artifact.clone()));
        Ok(artifact)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        kind: ArtifactKind,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Artifact>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|(k, a)| *k == kind && a.user_id == user_id)
            .skip(offset as usize)
            .take(limit as usize)
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn list_ids_by_user(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<Vec<Uuid>> {
        Ok(self
            .list_by_user(user_id, kind, i64::MAX, 0)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect())
    }

    async fn get(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<Option<Artifact>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|(k, a)| *k == kind && a.user_id == user_id && a.id == id)
            .map(|(_, a)| a.clone()))
    }

    async fn delete(&self, user_id: Uuid, kind: ArtifactKind, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(k, a)| !(*k == kind && a.user_id == user_id && a.id == id));
        Ok(rows.len() != before)
    }

    async fn clear(&self, user_id: Uuid, kind: ArtifactKind) -> anyhow::Result<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|(k, a)| !(*k == kind && a.user_id == user_id));
        Ok((before - rows.len()) as u64)
    }
}

/// Provider double that counts calls and records prompts.
pub struct FakeLlm {
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for FakeLlm {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.into());
        self.reply.clone().ok_or(ProviderError::Api {
            status: 503,
            message: "upstream overloaded".into(),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        jwt: crate::auth::jwt::test_jwt_config(),
        llm: LlmConfig {
            api_key: "test".into(),
            base_url: "http://127.0.0.1:9".into(),
            model: "test-model".into(),
            temperature: 0.7,
            max_tokens: 256,
            top_p: 1.0,
            timeout_secs: None,
        },
        cors_origins: Vec::new(),
    }
}

/// App state wired to in-memory parts, with handles kept for assertions.
pub struct TestApp {
    pub state: AppState,
    pub users: Arc<MemoryUserRepo>,
    pub artifacts: Arc<MemoryArtifactRepo>,
    pub llm: Arc<FakeLlm>,
}

impl TestApp {
    pub fn new(llm: FakeLlm) -> Self {
        let users = Arc::new(MemoryUserRepo::default());
        let artifacts = Arc::new(MemoryArtifactRepo::default());
        let llm = Arc::new(llm);
        let state = AppState::from_parts(
            Arc::new(test_config()),
            users.clone(),
            artifacts.clone(),
            llm.clone(),
        );
        Self {
            state,
            users,
            artifacts,
            llm,
        }
    }

    /// Creates a user directly in the repo and returns it with an access token.
    pub async fn user_with_token(&self, email: &str) -> (User, String) {
        let hash = hash_password("password123").unwrap();
        let user = self.users.create("Test User", email, &hash).await.unwrap();
        let token = JwtKeys::from_config(&self.state.config.jwt)
            .sign_access(user.id)
            .unwrap();
        (user, token)
    }
}
