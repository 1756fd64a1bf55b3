//! Command handlers
//!
//! Each handler drives the same page controller the web frontend uses.
//! Guarded commands pass through the route guard first and stop with the
//! login redirect when no token is stored.

use crate::backend::HttpBackend;
use crate::cli::output::Output;
use crate::cli::{Commands, HistoryCommands, RegisterArgs};
use crate::storage::FileStore;
use crate::utils::config::ClientConfig;
use anyhow::{anyhow, bail, Context as _, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use vitahealth_core::api::Backend;
use vitahealth_core::flows::detection::{run_detection, DetectionPage, SelectedImage};
use vitahealth_core::flows::login::{submit_login, LoginForm, LoginOutcome};
use vitahealth_core::flows::planner::{load_planner, PlannerBoard, PlannerView};
use vitahealth_core::flows::profile::{
    delete_record, fetch_history, load_profile, require_token, ProfileFetch, ProfilePage,
    DELETE_CONFIRMATION,
};
use vitahealth_core::flows::register::{submit_registration, RegisterForm, RegisterOutcome};
use vitahealth_core::routes::{guard, nav_links, GuardOutcome, Route};
use vitahealth_core::types::{HistoryRecord, ImageUpload};
use vitahealth_core::{ProgressStore, Session, SessionStore};

/// Everything a command needs
pub struct Context {
    pub config: ClientConfig,
    pub backend: HttpBackend,
    pub store: Arc<FileStore>,
    pub output: Output,
}

impl Context {
    pub fn new(config: ClientConfig, output: Output) -> Self {
        let backend = HttpBackend::new(&config.backend.origin);
        let store = Arc::new(FileStore::new(&config.storage.path));
        Self {
            config,
            backend,
            store,
            output,
        }
    }

    fn sessions(&self) -> SessionStore<Arc<FileStore>> {
        SessionStore::new(Arc::clone(&self.store))
    }

    fn progress(&self) -> ProgressStore<Arc<FileStore>> {
        ProgressStore::new(Arc::clone(&self.store))
    }

    /// Pass `route` through the guard and return the current session.
    fn enter(&self, route: Route) -> Result<Session> {
        match guard(route, self.store.as_ref()) {
            GuardOutcome::Allow(route) => {
                debug!(%route, "Entering guarded route");
                Ok(self.sessions().sync_from_storage())
            }
            GuardOutcome::Redirect(to) => {
                self.output.warning(&format!("Login required, redirecting to {}", to));
                self.output.command("vitahealth login --email <EMAIL>");
                bail!("not logged in")
            }
        }
    }

    /// Report an expired or missing session the way the profile page does
    fn expired(&self, fetch: ProfileFetch) -> anyhow::Error {
        match fetch {
            ProfileFetch::Expired { alert, redirect } => {
                self.output.warning(&alert);
                anyhow!("session expired, redirecting to {}", redirect)
            }
            ProfileFetch::Loaded(_) | ProfileFetch::Unavailable => anyhow!("profile unavailable"),
        }
    }
}

/// Execute a parsed command
pub async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Register(args) => register(ctx, args).await,
        Commands::Login { email, password } => login(ctx, email, password).await,
        Commands::Logout => logout(ctx),
        Commands::Whoami => whoami(ctx),
        Commands::Detect {
            image,
            open_planner,
        } => detect(ctx, &image, open_planner).await,
        Commands::Planner {
            vitamin,
            done,
            undo,
        } => {
            let toggle = done.map(|day| (day, true)).or(undo.map(|day| (day, false)));
            planner(ctx, &vitamin, toggle).await
        }
        Commands::History { action: None } => history(ctx).await,
        Commands::History {
            action: Some(HistoryCommands::Delete { id, yes }),
        } => delete_history(ctx, &id, yes).await,
        Commands::Profile => profile(ctx).await,
        Commands::Report { vitamin } => report(ctx, &vitamin),
        Commands::Config => show_config(ctx),
    }
}

async fn register(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let form = RegisterForm {
        firstname: args.firstname,
        lastname: args.lastname,
        email: args.email,
        password: args.password,
    };

    match submit_registration(&ctx.backend, &form).await {
        RegisterOutcome::Registered { modal, redirect } => {
            ctx.output.modal(&modal);
            ctx.output.hint(&format!("Continue at {}:", redirect));
            ctx.output
                .command(&format!("vitahealth login --email {}", form.email.trim()));
            Ok(())
        }
        RegisterOutcome::Rejected(modal) => bail!("{}: {}", modal.title, modal.message),
    }
}

async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let form = LoginForm { email, password };

    match submit_login(&ctx.backend, &ctx.sessions(), &form).await {
        LoginOutcome::LoggedIn { session, redirect } => {
            info!(store = %ctx.store.path().display(), "Session stored");
            ctx.output
                .success(&format!("Welcome back, {}!", session.display_name()));
            ctx.output.info(&format!("Continue at {}", redirect));
            Ok(())
        }
        LoginOutcome::Rejected(modal) => bail!("{}: {}", modal.title, modal.message),
    }
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.sessions().clear()?;
    ctx.output.success("Logged out");
    ctx.output.info("Redirecting to /home");
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    let session = ctx.sessions().sync_from_storage();

    if session.is_authenticated() {
        ctx.output.header(session.display_name());
        if let Some(user) = session.user() {
            ctx.output.kv("Email", &user.email);
        }
    } else {
        ctx.output.info("Not logged in");
    }

    ctx.output.subheader("Navigation");
    for link in nav_links(&session) {
        ctx.output.list_item(&format!("{:<10} {}", link.label, link.path));
    }
    if session.is_authenticated() {
        ctx.output.list_item(&format!("{:<10} {}", "Profile", Route::Profile));
        ctx.output.list_item(&format!("{:<10} {}", "Logout", Route::Home));
    }
    Ok(())
}

/// Build the upload from a file on disk
pub async fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(ImageUpload {
        file_name,
        mime_type,
        bytes,
    })
}

async fn detect(ctx: &Context, image: &Path, open_planner: bool) -> Result<()> {
    let session = ctx.enter(Route::Detect)?;
    let upload = read_image(image).await?;

    let mut page = DetectionPage::new();
    page.select_image(SelectedImage {
        upload,
        preview: Some(image.display().to_string()),
    });

    ctx.output.info("Analyzing...");
    let result = run_detection(&mut page, &ctx.backend, &session).await;

    if let Some(modal) = page.modal() {
        if modal.is_error() {
            bail!("{}: {}", modal.title, modal.message);
        }
        ctx.output.modal(modal);
    }
    let result = result.ok_or_else(|| anyhow!("detection produced no result"))?;

    ctx.output.header("Detection Result");
    ctx.output.kv("Disease", &result.disease);
    ctx.output.kv("Deficiency", &result.deficiency);
    ctx.output.kv("Confidence", &result.confidence_percent());

    match page.planner_route() {
        Some(Route::Planner { vitamin }) if open_planner => planner(ctx, &vitamin, None).await,
        Some(route) => {
            ctx.output.hint(&format!("Your diet plan lives at {}:", route));
            if let Route::Planner { vitamin } = route {
                ctx.output.command(&format!("vitahealth planner {}", vitamin));
            }
            Ok(())
        }
        None => Ok(()),
    }
}

async fn planner(ctx: &Context, vitamin: &str, toggle: Option<(String, bool)>) -> Result<()> {
    let session = ctx.enter(Route::Planner {
        vitamin: vitamin.to_string(),
    })?;
    let progress = ctx.progress();

    let mut board = match load_planner(&ctx.backend, &progress, &session, vitamin).await {
        PlannerView::Ready(board) => board,
        PlannerView::Loading | PlannerView::NoActivePlanner => {
            ctx.output.warning("No Active Planner Available");
            ctx.output
                .info("Run a deficiency detection first to unlock a personalized plan.");
            ctx.output.command("vitahealth detect <IMAGE>");
            return Ok(());
        }
    };

    if let Some((day, done)) = toggle {
        if !board.days().iter().any(|d| d.day == day) {
            bail!("'{}' is not a day of the {} plan", day, vitamin);
        }
        board.toggle_day(&progress, &day, done)?;
        let state = if done { "done" } else { "not done" };
        ctx.output.success(&format!("{} marked {}", day, state));
    }

    render_board(&ctx.output, &board, &ctx.backend.report_url(vitamin));
    Ok(())
}

fn render_board(output: &Output, board: &PlannerBoard, report_url: &str) {
    output.header(&format!("{} Diet Planner", board.vitamin()));
    if !board.fact().is_empty() {
        output.info(board.fact());
    }
    output.progress(board.completed_days(), board.total_days(), board.percentage());

    for day in board.days() {
        output.newline();
        output.check_item(board.is_done(&day.day), &day.day);
        for meal in &day.meals {
            output.meal(&meal.meal_type, &meal.food);
        }
    }

    output.hint("Download Full PDF Report:");
    output.command(report_url);
}

async fn history(ctx: &Context) -> Result<()> {
    let session = ctx.enter(Route::Profile)?;
    let token = require_token(&session).map_err(|fetch| ctx.expired(fetch))?;

    let records = fetch_history(&ctx.backend, token).await;
    render_history(&ctx.output, &records);
    Ok(())
}

fn render_history(output: &Output, records: &[HistoryRecord]) {
    output.header("Detection History");
    if records.is_empty() {
        output.info("No detection history yet.");
        return;
    }

    output.table_header(&["ID", "Result", "Date", "Planner"]);
    for record in records {
        let id = record.id.to_string();
        let summary = record.summary();
        let planner = ProfilePage::planner_route(record).path();
        output.table_row(&[
            id.as_str(),
            summary.as_str(),
            record.timestamp.as_deref().unwrap_or("-"),
            planner.as_str(),
        ]);
    }
}

async fn delete_history(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let session = ctx.enter(Route::Profile)?;
    let token = require_token(&session).map_err(|fetch| ctx.expired(fetch))?;
    let mut page = ProfilePage {
        profile: None,
        history: fetch_history(&ctx.backend, token).await,
    };
    // Typed ids are compared by string form; the backend may send either kind
    let Some(id) = page
        .history
        .iter()
        .find(|record| !record.id.is_missing() && record.id.matches(id))
        .map(|record| record.id.clone())
    else {
        bail!("No history record with id {}", id);
    };
    if !yes && !ctx.output.confirm(DELETE_CONFIRMATION) {
        ctx.output.info("Kept");
        return Ok(());
    }

    match delete_record(&mut page, &ctx.backend, token, &id).await {
        Ok(()) => ctx.output.success(&format!("Record {} deleted", id)),
        Err(e) => ctx
            .output
            .warning(&format!("Record {} removed locally, server said: {}", id, e)),
    }
    render_history(&ctx.output, &page.history);
    Ok(())
}

async fn profile(ctx: &Context) -> Result<()> {
    let session = ctx.enter(Route::Profile)?;
    let page = load_profile(&ctx.backend, &ctx.sessions(), &session)
        .await
        .map_err(|fetch| ctx.expired(fetch))?;

    ctx.output.header("Profile");
    match &page.profile {
        Some(profile) => {
            ctx.output.kv("First name", &profile.firstname);
            ctx.output.kv("Last name", &profile.lastname);
            ctx.output.kv("Email", &profile.email);
        }
        None => ctx.output.warning("Profile details unavailable"),
    }
    render_history(&ctx.output, &page.history);
    Ok(())
}

fn report(ctx: &Context, vitamin: &str) -> Result<()> {
    ctx.enter(Route::Planner {
        vitamin: vitamin.to_string(),
    })?;
    ctx.output.info("Download Full PDF Report:");
    ctx.output.command(&ctx.backend.report_url(vitamin));
    Ok(())
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Configuration");
    println!("{}", ctx.config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_image_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eye.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let upload = read_image(&path).await.unwrap();
        assert_eq!(upload.file_name, "eye.png");
        assert_eq!(upload.mime_type, "image/png");
        assert_eq!(upload.bytes.len(), 4);
    }

    #[tokio::test]
    async fn test_read_image_missing_file() {
        let err = read_image(Path::new("/nonexistent/eye.jpg")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read image"));
    }

    #[tokio::test]
    async fn test_guarded_command_without_session_skips_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::default();
        config.storage.path = dir.path().join("storage.json");
        // Unroutable origin: any request would fail with a connectivity error
        config.backend.origin = "http://127.0.0.1:9".to_string();
        let ctx = Context::new(config, Output::no_color());

        let err = run(&ctx, Commands::Profile).await.unwrap_err();
        assert_eq!(err.to_string(), "not logged in");
    }
}
