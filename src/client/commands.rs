use anyhow::Context;
use tracing::info;
use uuid::Uuid;

use super::{
    api::ApiClient,
    history::{now_iso, or_none, BlogEntry, EmailEntry, History, HistoryRecord},
    local_storage::LocalStorage,
};
use crate::{
    artifacts::ArtifactKind,
    auth::{AuthResponse, LoginRequest, SignupRequest},
    blogs::dto::GenerateBlogRequest,
    cli::{BlogAction, Cli, Command, EmailAction, HistoryAction, KindArg},
    emails::dto::GenerateEmailRequest,
    render::markdown_to_html,
};

/// Local storage key holding the signed-in session.
const USER_KEY: &str = "user";

/// Runs one client command. `Command::Serve` is handled by the caller.
pub async fn run(cli: &Cli, command: Command) -> anyhow::Result<()> {
    let mut storage = LocalStorage::open(&cli.storage)?;

    match command {
        Command::Serve => anyhow::bail!("`serve` starts the API server; it is not a client command"),
        Command::Signup { name, email, password } => {
            let api = ApiClient::new(&cli.api_url, None)?;
            let auth = api.signup(&SignupRequest { name, email, password }).await?;
            println!("Account created for {}. Please log in to continue.", auth.user.email);
        }
        Command::Login { email, password } => {
            let api = ApiClient::new(&cli.api_url, None)?;
            let auth = api.login(&LoginRequest { email, password }).await?;
            storage.set_item(USER_KEY, serde_json::to_string(&auth)?)?;
            info!(user_id = %auth.user.id, "session stored");
            println!("Logged in as {}.", auth.user.email);
        }
        Command::Logout => {
            storage.remove_item(USER_KEY)?;
            println!("Logged out.");
        }
        Command::Email { action } => email(cli, &mut storage, action).await?,
        Command::Blog { action } => blog(cli, &mut storage, action).await?,
        Command::History { action } => history(cli, &mut storage, action).await?,
    }
    Ok(())
}

fn session(storage: &LocalStorage) -> anyhow::Result<AuthResponse> {
    let raw = storage
        .get_item(USER_KEY)
        .context("not logged in; run `lexiflow login` first")?;
    serde_json::from_str(raw).context("stored session is unreadable; log in again")
}

fn authed_client(cli: &Cli, storage: &LocalStorage) -> anyhow::Result<ApiClient> {
    let session = session(storage)?;
    ApiClient::new(&cli.api_url, Some(session.token))
}

fn print_content(content: &str, html: bool) {
    if html {
        println!("{}", markdown_to_html(content));
    } else {
        println!("{}", content);
    }
}

async fn email(cli: &Cli, storage: &mut LocalStorage, action: EmailAction) -> anyhow::Result<()> {
    let EmailAction::Generate { subject, tone, length, context, html } = action;
    if subject.trim().is_empty() {
        anyhow::bail!("Subject required: please provide a subject for the email");
    }

    let api = authed_client(cli, storage)?;
    let resp = api
        .generate_email(&GenerateEmailRequest {
            subject: subject.clone(),
            tone: Some(tone.clone()),
            length: Some(length),
            context: context.clone(),
        })
        .await
        .context("Generation failed")?;

    print_content(&resp.content, html);

    let mut history = History::<EmailEntry>::load(storage)?;
    history.push(EmailEntry {
        id: 0,
        subject,
        tone,
        length,
        context: or_none(context.as_deref()),
        content: resp.content,
        date: now_iso(),
    });
    history.save(storage)?;
    info!(email_id = %resp.email_id, "email generated");
    Ok(())
}

async fn blog(cli: &Cli, storage: &mut LocalStorage, action: BlogAction) -> anyhow::Result<()> {
    let BlogAction::Generate { title, tone, length, keywords, html } = action;
    if title.trim().is_empty() {
        anyhow::bail!("Title required: please provide a title for your blog post");
    }

    let api = authed_client(cli, storage)?;
    let resp = api
        .generate_blog(&GenerateBlogRequest {
            title: title.clone(),
            tone: Some(tone.clone()),
            length: Some(length),
            keywords: keywords.clone(),
        })
        .await
        .context("Generation failed")?;

    print_content(&resp.content, html);

    let mut history = History::<BlogEntry>::load(storage)?;
    history.push(BlogEntry {
        id: 0,
        title,
        tone,
        length,
        keywords: or_none(keywords.as_deref()),
        content: resp.content,
        date: now_iso(),
    });
    history.save(storage)?;
    info!(blog_id = %resp.blog_id, "blog generated");
    Ok(())
}

async fn history(cli: &Cli, storage: &mut LocalStorage, action: HistoryAction) -> anyhow::Result<()> {
    match action {
        HistoryAction::List { kind, search, remote: true } => {
            if search.is_some() {
                anyhow::bail!("--search applies to local history only");
            }
            list_remote(&authed_client(cli, storage)?, kind).await
        }
        HistoryAction::List { kind, search, remote: false } => {
            let term = search.unwrap_or_default();
            match kind {
                KindArg::Email => list_local::<EmailEntry>(storage, &term, |e| e.subject.as_str()),
                KindArg::Blog => list_local::<BlogEntry>(storage, &term, |e| e.title.as_str()),
            }
        }
        HistoryAction::Show { kind, id, html } => {
            let content = match kind {
                KindArg::Email => History::<EmailEntry>::load(storage)?.get(id).map(|e| e.content.clone()),
                KindArg::Blog => History::<BlogEntry>::load(storage)?.get(id).map(|e| e.content.clone()),
            };
            let content = content.with_context(|| format!("no {} with id {} in history", ArtifactKind::from(kind), id))?;
            print_content(&content, html);
            Ok(())
        }
        HistoryAction::Delete { kind, id, remote: true } => {
            let id: Uuid = id.parse().context("remote ids are UUIDs")?;
            authed_client(cli, storage)?.delete_artifact(kind.into(), id).await?;
            println!("Deleted {} {}.", ArtifactKind::from(kind), id);
            Ok(())
        }
        HistoryAction::Delete { kind, id, remote: false } => {
            let id: i64 = id.parse().context("local ids are numbers")?;
            let removed = match kind {
                KindArg::Email => remove_local::<EmailEntry>(storage, id)?,
                KindArg::Blog => remove_local::<BlogEntry>(storage, id)?,
            };
            if !removed {
                anyhow::bail!("no {} with id {} in history", ArtifactKind::from(kind), id);
            }
            println!("Deleted {} {} from your history.", ArtifactKind::from(kind), id);
            Ok(())
        }
        HistoryAction::Clear { kind, remote: true } => {
            let deleted = authed_client(cli, storage)?.clear_history(kind.into()).await?;
            println!("Cleared {} server-side {} entries.", deleted, ArtifactKind::from(kind));
            Ok(())
        }
        HistoryAction::Clear { kind, remote: false } => {
            match kind {
                KindArg::Email => clear_local::<EmailEntry>(storage)?,
                KindArg::Blog => clear_local::<BlogEntry>(storage)?,
            }
            println!("History cleared.");
            Ok(())
        }
    }
}

fn list_local<T: HistoryRecord>(
    storage: &LocalStorage,
    term: &str,
    label: impl Fn(&T) -> &str,
) -> anyhow::Result<()> {
    let history = History::<T>::load(storage)?;
    let found = history.search(term);
    if found.is_empty() {
        if term.is_empty() {
            println!("Nothing generated yet.");
        } else {
            println!("No entries match \"{}\".", term);
        }
        return Ok(());
    }
    for entry in found {
        println!("{}\t{}", entry.id(), label(entry));
    }
    Ok(())
}

fn remove_local<T: HistoryRecord>(storage: &mut LocalStorage, id: i64) -> anyhow::Result<bool> {
    let mut history = History::<T>::load(storage)?;
    let removed = history.remove(id);
    if removed {
        history.save(storage)?;
    }
    Ok(removed)
}

fn clear_local<T: HistoryRecord>(storage: &mut LocalStorage) -> anyhow::Result<()> {
    let mut history = History::<T>::load(storage)?;
    history.clear();
    history.save(storage)
}

async fn list_remote(api: &ApiClient, kind: KindArg) -> anyhow::Result<()> {
    let rows: Vec<(Uuid, String, String)> = match kind {
        KindArg::Email => api
            .email_history()
            .await?
            .into_iter()
            .map(|e| (e.id, e.created_at.date().to_string(), e.subject))
            .collect(),
        KindArg::Blog => api
            .blog_history()
            .await?
            .into_iter()
            .map(|b| (b.id, b.created_at.date().to_string(), b.title))
            .collect(),
    };
    if rows.is_empty() {
        println!("Nothing generated yet.");
    }
    for (id, date, label) in rows {
        println!("{}\t{}\t{}", id, date, label);
    }
    Ok(())
}
