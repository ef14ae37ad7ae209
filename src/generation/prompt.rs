use super::Draft;
use crate::artifacts::ArtifactKind;

/// Natural-language instruction sent to the provider for a validated draft.
pub fn build(draft: &Draft) -> String {
    match draft.kind {
        ArtifactKind::Email => email_prompt(draft),
        ArtifactKind::Blog => blog_prompt(draft),
    }
}

fn email_prompt(d: &Draft) -> String {
    let mut prompt = format!(
        "Write a {} email with the subject \"{}\". It should be around {} words.",
        d.tone, d.subject, d.length
    );
    if let Some(context) = &d.details {
        prompt.push_str(&format!(
            " The email should consider the following context: {}.",
            context
        ));
    }
    prompt
}

fn blog_prompt(d: &Draft) -> String {
    let mut prompt = format!(
        "Write a {} blog post titled \"{}\". It should be around {} words.",
        d.tone, d.subject, d.length
    );
    if let Some(keywords) = &d.details {
        prompt.push_str(&format!(
            " Naturally work in the following keywords: {}.",
            keywords
        ));
    }
    prompt.push_str(" Use markdown headings for sections and **bold** for key phrases.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: ArtifactKind, details: Option<&str>) -> Draft {
        Draft {
            kind,
            subject: "Meeting Follow-up".into(),
            tone: "formal".into(),
            length: 150,
            details: details.map(String::from),
        }
    }

    #[test]
    fn email_without_context() {
        assert_eq!(
            build(&draft(ArtifactKind::Email, None)),
            "Write a formal email with the subject \"Meeting Follow-up\". It should be around 150 words."
        );
    }

    #[test]
    fn email_with_context() {
        let p = build(&draft(ArtifactKind::Email, Some("budget review moved to Friday")));
        assert!(p.ends_with(" The email should consider the following context: budget review moved to Friday."));
    }

    #[test]
    fn blog_mentions_title_keywords_and_format() {
        let mut d = draft(ArtifactKind::Blog, Some("rust, async"));
        d.subject = "Why Rust".into();
        d.tone = "casual".into();
        d.length = 800;
        let p = build(&d);
        assert!(p.starts_with("Write a casual blog post titled \"Why Rust\". It should be around 800 words."));
        assert!(p.contains("keywords: rust, async."));
        assert!(p.contains("markdown headings"));
    }
}
