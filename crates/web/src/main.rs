mod page;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ideacheck_core::analysis::HttpAnalysisClient;
use ideacheck_core::domain::SectionKey;
use ideacheck_core::export::ExportScope;
use ideacheck_core::history::HistoryStore;
use ideacheck_core::session::{Session, SubmitOutcome};
use ideacheck_core::storage::FileStore;

use page::PageOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = ideacheck_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let client = match HttpAnalysisClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "analysis client init failed");
            return Err(e);
        }
    };

    let history_dir = settings.history_dir();
    tracing::info!(
        history_dir = %history_dir.display(),
        analysis_base_url = settings.analysis_base_url(),
        "starting"
    );
    let history = HistoryStore::new(Arc::new(FileStore::new(history_dir)));

    let state = AppState {
        session: Arc::new(Session::new(Arc::new(client), history)),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/back", get(back))
        .route("/section/:key", get(open_section))
        .route("/export", get(export_all))
        .route("/export/:scope", get(export_scope))
        .route("/history", get(history_panel))
        .route("/history/view/:id", get(view_history))
        .route("/history/delete/:id", post(delete_history))
        .route("/history/clear", post(clear_history))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    session: Arc<Session>,
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
struct IndexQuery {
    #[serde(default)]
    empty: Option<String>,
}

async fn index(State(state): State<AppState>, Query(q): Query<IndexQuery>) -> Html<String> {
    state.session.close_section();
    let opts = PageOptions {
        empty_idea: q.empty.is_some(),
        ..Default::default()
    };
    Html(page::render(&state.session.snapshot(), &opts))
}

#[derive(Debug, Deserialize)]
struct IdeaForm {
    #[serde(default)]
    idea: String,
}

async fn analyze(State(state): State<AppState>, Form(form): Form<IdeaForm>) -> Redirect {
    match state.session.submit(&form.idea).await {
        SubmitOutcome::EmptyIdea => Redirect::to("/?empty=1"),
        SubmitOutcome::Busy => Redirect::to("/"),
        SubmitOutcome::Failed(notice) => {
            tracing::debug!(message = %notice.message, "validation surfaced a notice");
            Redirect::to("/")
        }
        SubmitOutcome::Completed(presented) => {
            if let Some(entry) = &presented.history_entry {
                tracing::info!(id = %entry.id, "report saved to history");
            }
            Redirect::to("/")
        }
    }
}

async fn back(State(state): State<AppState>) -> Redirect {
    state.session.back();
    Redirect::to("/")
}

async fn open_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, StatusCode> {
    let key: SectionKey = key.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    if state.session.open_section(key).is_none() {
        return Ok(Redirect::to("/").into_response());
    }
    let html = page::render(&state.session.snapshot(), &PageOptions::default());
    Ok(Html(html).into_response())
}

async fn export_all(State(state): State<AppState>) -> Response {
    export(&state, ExportScope::All)
}

async fn export_scope(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Response, StatusCode> {
    let scope: ExportScope = scope.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(export(&state, scope))
}

fn export(state: &AppState, scope: ExportScope) -> Response {
    match state.session.export(scope) {
        Ok(doc) => {
            tracing::info!(%scope, title = %doc.title, "print document rendered");
            Html(doc.html).into_response()
        }
        // The notice is queued on the session and shown on the next paint.
        Err(_) => Redirect::to("/").into_response(),
    }
}

async fn history_panel(State(state): State<AppState>) -> Html<String> {
    state.session.close_section();
    let opts = PageOptions {
        history: Some(state.session.history_panel(Utc::now()).await),
        ..Default::default()
    };
    Html(page::render(&state.session.snapshot(), &opts))
}

async fn view_history(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    match state.session.view_history(&id).await {
        Some(_) => Redirect::to("/"),
        None => {
            tracing::warn!(%id, "history entry not found");
            Redirect::to("/history")
        }
    }
}

async fn delete_history(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.session.delete_history(&id).await;
    Redirect::to("/history")
}

#[derive(Debug, Deserialize)]
struct ClearForm {
    #[serde(default)]
    confirm: Option<String>,
}

async fn clear_history(State(state): State<AppState>, Form(form): Form<ClearForm>) -> Redirect {
    let confirmed = form.confirm.as_deref() == Some("yes");
    if state.session.clear_history(confirmed).await {
        Redirect::to("/")
    } else {
        Redirect::to("/history")
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &ideacheck_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.require_sentry_dsn().ok()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
