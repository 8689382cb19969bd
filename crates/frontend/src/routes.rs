use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use client::notice::{self, Notice};
use client::ApiClient;
use common::unix_now;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::assets;
use crate::config::Args;
use crate::error::AppError;
use crate::form::ActionForm;
use crate::render;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub ssh_host: Arc<str>,
}

impl AppState {
    pub fn new(api: ApiClient, ssh_host: &str) -> Self {
        Self {
            api,
            ssh_host: Arc::from(ssh_host),
        }
    }

    pub fn from_args(args: &Args) -> Result<Self, AppError> {
        Ok(Self::new(ApiClient::new(&args.api)?, &args.ssh_host))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(assets::index))
        .route("/static/{*path}", get(assets::static_file))
        .route("/healthz", get(|| async { "ok" }))
        .route("/ui/reserve", post(reserve))
        .route("/ui/release", post(release))
        .route("/ui/extend", post(extend))
        .route("/ui/check", post(check))
        .route("/ui/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn fragment(body: String) -> impl IntoResponse {
    ([(header::CACHE_CONTROL, "no-cache")], Html(body))
}

fn response_area(
    action: &str,
    user: &str,
    notices: Vec<Notice>,
) -> Result<impl IntoResponse, AppError> {
    if notices.iter().any(Notice::is_failure) {
        warn!(action, user, "action failed");
    } else {
        info!(action, user, "action succeeded");
    }
    Ok(fragment(render::response_area(&notices)?))
}

async fn reserve(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let form = ActionForm::from_pairs(fields);
    let notices = match form.reserve_request() {
        Ok(req) => {
            info!(user = %req.username, gpus = ?req.gpus, seconds = req.reservation_time, privileged = req.privileged, "reserve");
            notice::reserve_notices(state.api.reserve(&req).await, &state.ssh_host)
        }
        Err(e) => vec![Notice::failure(e.to_string())],
    };
    response_area("reserve", &form.username, notices)
}

async fn release(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let form = ActionForm::from_pairs(fields);
    let notices = notice::release_notices(state.api.release(&form.credentials()).await);
    response_area("release", &form.username, notices)
}

async fn extend(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let form = ActionForm::from_pairs(fields);
    let notices = match form.extend_request() {
        Ok(req) => notice::extend_notices(state.api.extend(&req).await),
        Err(e) => vec![Notice::failure(e.to_string())],
    };
    response_area("extend", &form.username, notices)
}

async fn check(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let form = ActionForm::from_pairs(fields);
    let result = state.api.user_status(&form.credentials()).await;
    let notices = notice::check_notices(result, &state.ssh_host);
    response_area("check", &form.username, notices)
}

async fn status(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = match state.api.status().await {
        Ok(status) => render::gpu_list(&status.slots(unix_now()))?,
        Err(err) => {
            warn!(error = %err, "failed to load GPU status");
            render::notices(&[notice::error_notice(&err)])?
        }
    };
    Ok(fragment(body))
}
