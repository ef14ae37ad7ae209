use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::artifacts::ArtifactKind;

#[derive(Parser, Debug)]
#[command(name = "lexiflow", version, about = "Generate emails and blog posts with an LLM")]
pub struct Cli {
    /// Base URL of the LexiFlow API (client commands).
    #[arg(long, env = "LEXIFLOW_API_URL", default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Local storage file holding the session and generation history.
    #[arg(long, env = "LEXIFLOW_STORAGE", default_value = ".lexiflow/storage.json", global = true)]
    pub storage: PathBuf,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server.
    Serve,
    /// Create an account.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEXIFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and store the session locally.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEXIFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    Email {
        #[command(subcommand)]
        action: EmailAction,
    },
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmailAction {
    Generate {
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "formal")]
        tone: String,
        #[arg(long, default_value_t = 150)]
        length: u32,
        #[arg(long)]
        context: Option<String>,
        /// Print the result with markdown rendered to HTML.
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlogAction {
    Generate {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "informative")]
        tone: String,
        #[arg(long, default_value_t = 500)]
        length: u32,
        /// Comma-separated.
        #[arg(long)]
        keywords: Option<String>,
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    List {
        kind: KindArg,
        /// Case-insensitive filter (local history only).
        #[arg(long)]
        search: Option<String>,
        /// List the server-side history instead of the local one.
        #[arg(long)]
        remote: bool,
    },
    Show {
        kind: KindArg,
        id: i64,
        #[arg(long)]
        html: bool,
    },
    Delete {
        kind: KindArg,
        /// Local entry id, or the artifact UUID with `--remote`.
        id: String,
        #[arg(long)]
        remote: bool,
    },
    Clear {
        kind: KindArg,
        #[arg(long)]
        remote: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Email,
    Blog,
}

impl From<KindArg> for ArtifactKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Email => ArtifactKind::Email,
            KindArg::Blog => ArtifactKind::Blog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["lexiflow"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn email_generate_defaults_match_the_form() {
        let cli = Cli::try_parse_from(["lexiflow", "email", "generate", "--subject", "Hi"]).unwrap();
        match cli.command {
            Some(Command::Email {
                action: EmailAction::Generate { subject, tone, length, context, html },
            }) => {
                assert_eq!(subject, "Hi");
                assert_eq!(tone, "formal");
                assert_eq!(length, 150);
                assert!(context.is_none());
                assert!(!html);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn history_kind_is_an_enum() {
        let cli = Cli::try_parse_from(["lexiflow", "history", "clear", "blog", "--remote"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::History { action: HistoryAction::Clear { kind: KindArg::Blog, remote: true } })
        ));
        assert!(Cli::try_parse_from(["lexiflow", "history", "clear", "tweet"]).is_err());
    }
}
