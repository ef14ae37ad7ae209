use clap::Parser;

mod app;
mod artifacts;
mod auth;
mod blogs;
mod cli;
mod client;
mod config;
mod db;
mod emails;
mod error;
mod extract;
#[cfg(test)]
mod fakes;
mod generation;
mod llm;
mod render;
mod state;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Command::Serve);
    let serving = matches!(command, Command::Serve);

    init_tracing(if serving {
        "lexiflow=debug,axum=info,tower_http=info"
    } else {
        "lexiflow=warn"
    });

    if !serving {
        return client::commands::run(&cli, command).await;
    }

    let app_state = state::AppState::init().await?;
    let app = app::build_app(app_state);
    app::serve(app).await
}

fn init_tracing(default_filter: &str) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        // client output goes to stdout, keep logs on stderr
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
