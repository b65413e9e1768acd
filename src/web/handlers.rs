//! HTTP handlers.

use crate::catalog::Language;
use crate::constants::{messages, server::UPLOADS_ROUTE};
use crate::error::Error;
use crate::web::AppState;
use crate::web::render::{PageContext, render_page};
use crate::web::upload::save_upload;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tracing::{error, info, warn};

/// Failure that aborts a request instead of being shown on the page.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was rejected, with the status to report.
    Rejected {
        /// 400 for malformed bodies, 413 past the upload limit.
        status: StatusCode,
        /// Client-facing reason.
        message: String,
    },
    /// Something failed on the server side.
    Internal(Error),
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected { status, message } => {
                warn!("Rejected request ({status}): {message}");
                (status, message).into_response()
            }
            Self::Internal(err) => {
                error!("Request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Something went wrong: {err}"),
                )
                    .into_response()
            }
        }
    }
}

/// The `file` part of an upload form.
#[derive(Debug)]
struct UploadedFile {
    file_name: String,
    bytes: Vec<u8>,
}

/// Parsed upload form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    month: Option<String>,
    language: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            // A `file` part without a filename is a plain field, not an upload.
            "file" => {
                if let Some(file_name) = field.file_name().map(str::to_string) {
                    let bytes = field.bytes().await?.to_vec();
                    form.file = Some(UploadedFile { file_name, bytes });
                }
            }
            "month" => form.month = Some(field.text().await?),
            "lang" => form.language = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(form)
}

/// Run the upload-predict-describe flow.
///
/// User mistakes and prediction failures end up in `context.error`; only
/// server-side failures are returned as errors.
async fn identify(state: &AppState, form: UploadForm) -> Result<PageContext, Error> {
    let language = form
        .language
        .as_deref()
        .map_or(state.default_language, Language::from_code);

    let mut context = PageContext {
        model_loaded: state.model_loaded(),
        language,
        month: form.month.clone(),
        ..PageContext::default()
    };

    let Some(file) = form.file else {
        context.error = Some(messages::NO_FILE_UPLOADED.to_string());
        return Ok(context);
    };

    if file.file_name.is_empty() {
        context.error = Some(messages::NO_FILE_SELECTED.to_string());
        return Ok(context);
    }

    let saved = save_upload(&state.upload_dir, &file.file_name, &file.bytes).await?;
    context.image = Some(format!("{UPLOADS_ROUTE}/{}", saved.file_name));

    let Some(predictor) = state.predictor.clone() else {
        context.error = Some(messages::MODEL_NOT_LOADED.to_string());
        return Ok(context);
    };

    let path = saved.path.clone();
    let outcome = tokio::task::spawn_blocking(move || predictor.predict(&path))
        .await
        .map_err(|e| Error::Internal {
            message: format!("prediction task failed: {e}"),
        })?;

    let prediction = match outcome {
        Ok(Some(prediction)) => prediction,
        Ok(None) => {
            info!("No confident prediction for {}", saved.file_name);
            context.error = Some(messages::NO_MUSHROOM_DETECTED.to_string());
            return Ok(context);
        }
        Err(e) => {
            warn!("Prediction failed for {}: {e}", saved.file_name);
            context.error = Some(format!("Prediction error: {e}"));
            return Ok(context);
        }
    };

    match state
        .catalog
        .describe(&prediction.label, form.month.as_deref(), language)
    {
        Some(report) => {
            info!(
                "Identified {} as {} ({:.3})",
                saved.file_name, report.canonical_name, prediction.confidence
            );
            context.month = Some(report.month.clone());
            context.result = Some(report);
        }
        None => context.error = Some(messages::NO_MUSHROOM_DETECTED.to_string()),
    }
    context.prediction = Some(prediction);

    Ok(context)
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&PageContext {
        model_loaded: state.model_loaded(),
        language: state.default_language,
        ..PageContext::default()
    }))
}

/// POST /
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let form = read_form(multipart).await?;
    let context = identify(&state, form).await?;
    Ok(Html(render_page(&context)))
}

/// POST /api/predict
pub async fn api_predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PageContext>, ApiError> {
    let form = read_form(multipart).await?;
    Ok(Json(identify(&state, form).await?))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the server runs.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Whether predictions are available.
    pub model_loaded: bool,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::constants::APP_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_loaded: state.model_loaded(),
    })
}
