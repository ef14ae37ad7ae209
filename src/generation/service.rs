use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::{prompt, Draft};
use crate::{
    artifacts::{Artifact, NewArtifact},
    error::ApiError,
    state::AppState,
};

/// Builds the prompt, makes a single provider call and stores the result for
/// `owner`. Failures after validation collapse into `ApiError::Generation`; a
/// completion already produced is not rolled back if the insert fails.
#[instrument(skip(state, draft), fields(kind = %draft.kind))]
pub async fn generate_and_store(
    state: &AppState,
    owner: Uuid,
    draft: Draft,
) -> Result<Artifact, ApiError> {
    let prompt = prompt::build(&draft);
    debug!(%owner, prompt = %prompt, "prompt built");

    let content = state.llm.complete(&prompt).await.map_err(|e| {
        error!(error = %e, %owner, "completion failed");
        ApiError::Generation(draft.kind)
    })?;

    let kind = draft.kind;
    let artifact = state
        .artifacts
        .insert(NewArtifact {
            kind,
            user_id: owner,
            subject: draft.subject,
            tone: draft.tone,
            length: draft.length as i32,
            details: draft.details,
            content,
        })
        .await
        .map_err(|e| {
            error!(error = %e, %owner, "storing generated artifact failed");
            ApiError::Generation(kind)
        })?;

    info!(%owner, artifact_id = %artifact.id, "artifact generated");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        artifacts::ArtifactKind,
        fakes::{FakeLlm, TestApp},
    };

    fn email_draft() -> Draft {
        Draft::validate(ArtifactKind::Email, "Meeting Follow-up", Some("formal"), Some(150), None)
            .unwrap()
    }

    #[tokio::test]
    async fn stores_artifact_owned_by_caller() {
        let app = TestApp::new(FakeLlm::replying("Dear team, thanks for joining."));
        let owner = Uuid::new_v4();

        let artifact = generate_and_store(&app.state, owner, email_draft()).await.unwrap();

        assert_eq!(artifact.user_id, owner);
        assert_eq!(artifact.content, "Dear team, thanks for joining.");
        assert_eq!(artifact.subject, "Meeting Follow-up");
        assert_eq!(app.llm.calls(), 1);
        assert!(app.llm.last_prompt().unwrap().contains("\"Meeting Follow-up\""));

        let stored = app.artifacts.all(ArtifactKind::Email);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, owner);
        assert_eq!(stored[0].id, artifact.id);
    }

    #[tokio::test]
    async fn provider_failure_is_generic_and_stores_nothing() {
        let app = TestApp::new(FakeLlm::failing());
        let err = generate_and_store(&app.state, Uuid::new_v4(), email_draft())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Generation(ArtifactKind::Email)));
        assert_eq!(err.to_string(), "Failed to generate email");
        assert_eq!(app.llm.calls(), 1);
        assert!(app.artifacts.all(ArtifactKind::Email).is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_as_generation_error() {
        let app = TestApp::new(FakeLlm::replying("text"));
        app.artifacts.fail_inserts();

        let draft = Draft::validate(ArtifactKind::Blog, "Rust at work", None, None, None).unwrap();
        let err = generate_and_store(&app.state, Uuid::new_v4(), draft).await.unwrap_err();

        assert!(matches!(err, ApiError::Generation(ArtifactKind::Blog)));
        assert_eq!(app.llm.calls(), 1);
    }
}
