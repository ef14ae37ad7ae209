//! Validation, prompt construction and provider orchestration shared by the
//! email and blog endpoints.

pub mod prompt;
mod service;

pub use service::generate_and_store;

use crate::{artifacts::ArtifactKind, error::ApiError};

/// Longest subject/title the store accepts.
pub const MAX_SUBJECT_CHARS: usize = 150;

/// Per-kind defaults and bounds, taken from the generation forms.
struct Rules {
    subject_label: &'static str,
    default_tone: &'static str,
    default_length: u32,
    min_length: u32,
    max_length: u32,
}

fn rules(kind: ArtifactKind) -> Rules {
    match kind {
        ArtifactKind::Email => Rules {
            subject_label: "Email subject",
            default_tone: "formal",
            default_length: 150,
            min_length: 50,
            max_length: 1000,
        },
        ArtifactKind::Blog => Rules {
            subject_label: "Blog title",
            default_tone: "informative",
            default_length: 500,
            min_length: 100,
            max_length: 2000,
        },
    }
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub kind: ArtifactKind,
    pub subject: String,
    pub tone: String,
    pub length: u32,
    /// Email context or blog keywords.
    pub details: Option<String>,
}

impl Draft {
    pub fn validate(
        kind: ArtifactKind,
        subject: &str,
        tone: Option<&str>,
        length: Option<u32>,
        details: Option<&str>,
    ) -> Result<Self, ApiError> {
        let rules = rules(kind);

        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ApiError::BadRequest(format!("{} is required", rules.subject_label)));
        }
        if subject.chars().count() > MAX_SUBJECT_CHARS {
            return Err(ApiError::BadRequest(format!(
                "{} must be at most {} characters",
                rules.subject_label, MAX_SUBJECT_CHARS
            )));
        }

        let length = length.unwrap_or(rules.default_length);
        if !(rules.min_length..=rules.max_length).contains(&length) {
            return Err(ApiError::BadRequest(format!(
                "Length must be between {} and {} words",
                rules.min_length, rules.max_length
            )));
        }

        let tone = tone
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(rules.default_tone)
            .to_string();

        let details = details
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(Self {
            kind,
            subject: subject.to_string(),
            tone,
            length,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_subject_is_rejected() {
        for subject in ["", "   ", "\n\t"] {
            let err = Draft::validate(ArtifactKind::Email, subject, None, None, None).unwrap_err();
            assert!(matches!(&err, ApiError::BadRequest(m) if m == "Email subject is required"));
        }
        let err = Draft::validate(ArtifactKind::Blog, "", None, None, None).unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(m) if m == "Blog title is required"));
    }

    #[test]
    fn defaults_follow_kind() {
        let email = Draft::validate(ArtifactKind::Email, "Hi", None, None, Some("  ")).unwrap();
        assert_eq!(email.tone, "formal");
        assert_eq!(email.length, 150);
        assert_eq!(email.details, None);

        let blog = Draft::validate(ArtifactKind::Blog, "Rust", Some(""), None, None).unwrap();
        assert_eq!(blog.tone, "informative");
        assert_eq!(blog.length, 500);
    }

    #[test]
    fn trims_fields() {
        let d = Draft::validate(
            ArtifactKind::Email,
            "  Meeting Follow-up ",
            Some(" friendly "),
            Some(200),
            Some(" after Tuesday's sync "),
        )
        .unwrap();
        assert_eq!(d.subject, "Meeting Follow-up");
        assert_eq!(d.tone, "friendly");
        assert_eq!(d.details.as_deref(), Some("after Tuesday's sync"));
    }

    #[test]
    fn length_bounds_per_kind() {
        assert!(Draft::validate(ArtifactKind::Email, "x", None, Some(50), None).is_ok());
        assert!(Draft::validate(ArtifactKind::Email, "x", None, Some(49), None).is_err());
        assert!(Draft::validate(ArtifactKind::Email, "x", None, Some(1001), None).is_err());
        assert!(Draft::validate(ArtifactKind::Blog, "x", None, Some(2000), None).is_ok());
        assert!(Draft::validate(ArtifactKind::Blog, "x", None, Some(50), None).is_err());
    }

    #[test]
    fn subject_length_is_capped() {
        let long = "a".repeat(MAX_SUBJECT_CHARS + 1);
        assert!(Draft::validate(ArtifactKind::Email, &long, None, None, None).is_err());
        let ok = "é".repeat(MAX_SUBJECT_CHARS);
        assert!(Draft::validate(ArtifactKind::Email, &ok, None, None, None).is_ok());
    }
}
