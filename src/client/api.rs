use anyhow::Context;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    artifacts::ArtifactKind,
    auth::{AuthResponse, LoginRequest, SignupRequest},
    blogs::dto::{BlogItem, GenerateBlogRequest, GenerateBlogResponse},
    emails::dto::{EmailItem, GenerateEmailRequest, GenerateEmailResponse},
    error::ErrorBody,
};

const FALLBACK_ERROR: &str = "Something went wrong";

/// HTTP client for the LexiFlow REST API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

/// Picks the server's `{"error": ...}` message out of a failed response body.
pub fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            http: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> anyhow::Result<Response> {
        let resp = req.send().await.context("request to LexiFlow API failed")?;
        let status = resp.status();
        debug!(%status, url = %resp.url(), "api response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.bytes().await.unwrap_or_default();
        anyhow::bail!(error_message(&body))
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> anyhow::Result<R> {
        let resp = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(resp.json().await?)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> anyhow::Result<R> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        Ok(resp.json().await?)
    }

    pub async fn signup(&self, body: &SignupRequest) -> anyhow::Result<AuthResponse> {
        self.post_json("/user/signup", body).await
    }

    pub async fn login(&self, body: &LoginRequest) -> anyhow::Result<AuthResponse> {
        self.post_json("/user/login", body).await
    }

    pub async fn generate_email(&self, body: &GenerateEmailRequest) -> anyhow::Result<GenerateEmailResponse> {
        self.post_json("/email/generateemail", body).await
    }

    pub async fn generate_blog(&self, body: &GenerateBlogRequest) -> anyhow::Result<GenerateBlogResponse> {
        self.post_json("/blog/generateblog", body).await
    }

    pub async fn email_history(&self) -> anyhow::Result<Vec<EmailItem>> {
        self.get_json("/email/history").await
    }

    pub async fn blog_history(&self) -> anyhow::Result<Vec<BlogItem>> {
        self.get_json("/blog/history").await
    }

    pub async fn delete_artifact(&self, kind: ArtifactKind, id: Uuid) -> anyhow::Result<()> {
        self.send(self.request(Method::DELETE, &format!("/{}/{}", kind, id))).await?;
        Ok(())
    }

    pub async fn clear_history(&self, kind: ArtifactKind) -> anyhow::Result<u64> {
        let resp = self
            .send(self.request(Method::DELETE, &format!("/{}/history", kind)))
            .await?;
        let body: serde_json::Value = resp.json().await?;
        Ok(body["deleted"].as_u64().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_server_text() {
        assert_eq!(error_message(br#"{"error":"Email subject is required"}"#), "Email subject is required");
    }

    #[test]
    fn error_message_falls_back() {
        assert_eq!(error_message(b"<html>bad gateway</html>"), FALLBACK_ERROR);
        assert_eq!(error_message(br#"{"error":""}"#), FALLBACK_ERROR);
        assert_eq!(error_message(b""), FALLBACK_ERROR);
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
