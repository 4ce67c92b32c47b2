use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{Result, RedubError};
use crate::workflow::{JobRequest, Workflow};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct ApiError(pub String, pub StatusCode);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (message, status) = (self.0, self.1);
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<RedubError> for ApiError {
    fn from(e: RedubError) -> Self {
        let status = StatusCode::from_u16(e.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self(e.to_string(), status)
    }
}

pub fn create_router(workflow: Arc<Workflow>) -> Router {
    let max_upload_bytes = workflow.config().server.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/api/translate", post(translate_video).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(workflow)
}

pub async fn serve(workflow: Workflow) -> Result<()> {
    let bind = workflow.config().server.bind.clone();
    let listener = TcpListener::bind(&bind).await?;
    info!("Server running on http://{}", bind);

    axum::serve(listener, create_router(Arc::new(workflow))).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn method_not_allowed() -> ApiError {
    ApiError("Method not allowed".to_string(), StatusCode::METHOD_NOT_ALLOWED)
}

async fn translate_video(
    State(workflow): State<Arc<Workflow>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Response {
    let request = match multipart {
        Ok(multipart) => read_form(multipart).await,
        Err(e) => Err(e.to_string()),
    };

    let request = match request {
        Ok(request) => request,
        Err(e) => {
            error!("Failed to parse form data: {}", e);
            return ApiError("Failed to parse form data".to_string(), StatusCode::INTERNAL_SERVER_ERROR)
                .into_response();
        }
    };

    match workflow.translate(request).await {
        Ok(video) => (StatusCode::OK, Json(TranslateResponse { url: video.to_data_url() })).into_response(),
        Err(e) => {
            error!("Translation request failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Collect the `video`, `targetLang` and `sourceLang` fields; others are ignored.
async fn read_form(mut multipart: Multipart) -> std::result::Result<JobRequest, String> {
    let mut request = JobRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "video" => {
                request.file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                info!("Received {} ({} bytes)",
                      request.file_name.as_deref().unwrap_or("unnamed upload"), bytes.len());
                request.video = Some(bytes.to_vec());
            }
            "targetLang" => {
                request.target_language = Some(field.text().await.map_err(|e| e.to_string())?);
            }
            "sourceLang" => {
                request.source_language = Some(field.text().await.map_err(|e| e.to_string())?);
            }
            _ => {}
        }
    }

    Ok(request)
}
