use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use clap::Args;
use lcsforge::api::{self, StepQuery};
use lcsforge::error::{LcsError, LcsResult};
use lcsforge::viz::html::render_page;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Ports tried after `--port` before giving up.
const PORT_ATTEMPTS: u16 = 100;

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// First port to try; the next free one is used.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

struct AppError(LcsError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LcsError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<LcsError> for AppError {
    fn from(e: LcsError) -> Self {
        AppError(e)
    }
}

#[derive(Deserialize)]
struct PairForm {
    str1: String,
    str2: String,
}

#[derive(Serialize)]
struct StatusResponse {
    status: String,
    version: String,
}

async fn page(Query(query): Query<StepQuery>) -> Result<Html<String>, AppError> {
    let session = api::open_session(&query)?;
    Ok(Html(render_page(&session)))
}

async fn submit(Form(form): Form<PairForm>) -> Result<Html<String>, AppError> {
    let query = StepQuery {
        str1: Some(form.str1),
        str2: Some(form.str2),
        step: Some(0),
    };
    let session = api::open_session(&query)?;
    Ok(Html(render_page(&session)))
}

async fn step_json(Query(query): Query<StepQuery>) -> Result<Json<api::StepView>, AppError> {
    Ok(Json(api::step_view(&query)?))
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(page).post(submit))
        .route("/api/step", get(step_json))
        .route("/health", get(health))
}

async fn bind_first_free(host: &str, start: u16) -> LcsResult<TcpListener> {
    let end = start.saturating_add(PORT_ATTEMPTS);
    for port in start..end {
        let addr = format!("{}:{}", host, port);
        match TcpListener::bind(&addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) => warn!("Port {} unavailable: {}", port, e),
        }
    }
    Err(LcsError::Config(format!(
        "no free port between {} and {}",
        start, end
    )))
}

pub fn run(args: &ServeArgs) -> LcsResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = bind_first_free(&args.host, args.port).await?;
        let addr: SocketAddr = listener.local_addr()?;

        info!("🌐 LCS visualizer running at http://{}/", addr);
        println!("Open http://{}/ in a browser. Press Ctrl+C to stop.", addr);

        axum::serve(listener, router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
        info!("Server stopped");
        Ok::<(), LcsError>(())
    })
}
