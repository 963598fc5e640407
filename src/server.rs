//! HTTP surface for the screening service.
//!
//! One route per user action: batch table screening, single-vector
//! screening, the informational panel, and the quit action. Each request
//! runs to completion on its own; the only shared mutable state is the
//! session flag.

use crate::dataset::ScreeningTable;
use crate::error::ScreeningError;
use crate::features::{parse_feature_vector, FeatureMatrix};
use crate::info::InfoTopic;
use crate::model::Predictor;
use crate::types::{Diagnosis, PredictionRecord};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

/// Filename offered for the augmented table download.
pub const DOWNLOAD_FILENAME: &str = "Prediction_Results.csv";

/// Session lifecycle flag: Active until quit, then Terminated.
///
/// Terminated is absorbing; only a process restart reactivates screening.
#[derive(Debug, Default)]
pub struct SessionState {
    ended: AtomicBool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            ended: AtomicBool::new(false),
        }
    }

    /// Transition Active -> Terminated.
    pub fn end(&self) {
        self.ended.store(true, Ordering::SeqCst);
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<(), ScreeningError> {
        if self.is_ended() {
            Err(ScreeningError::SessionEnded)
        } else {
            Ok(())
        }
    }
}

/// Shared application state handed to every handler.
pub struct AppState {
    predictor: Arc<dyn Predictor>,
    session: SessionState,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            session: SessionState::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/screen/batch", post(screen_batch))
        .route("/screen/vector", post(screen_vector))
        .route("/info/{topic}", get(info_panel))
        .route("/session/quit", post(quit))
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct VectorRequest {
    /// Comma-separated feature values, e.g. "5,1,1,1,2,1,3,1,1"
    values: String,
}

#[derive(Debug, Serialize)]
struct VectorResponse {
    diagnosis: Diagnosis,
    report: &'static str,
}

#[derive(Debug, Serialize)]
struct InfoResponse {
    topic: &'static str,
    title: &'static str,
    content: &'static str,
}

#[derive(Debug, Serialize)]
struct QuitResponse {
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health() -> &'static str {
    "ok"
}

/// Screen an uploaded delimited table and return it augmented with a
/// prediction column as a downloadable file.
async fn screen_batch(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ScreeningError> {
    state.session.ensure_active()?;

    let table = ScreeningTable::parse(&body)?;
    let labels = state.predictor.predict(&table.to_matrix())?;

    let records: Vec<PredictionRecord> = labels
        .iter()
        .enumerate()
        .map(|(row, &label)| PredictionRecord::from_label(row, label))
        .collect();
    for record in &records {
        debug!(patient = record.patient, diagnosis = %record.diagnosis, "Screened sample");
    }
    let positives = records
        .iter()
        .filter(|r| r.diagnosis == Diagnosis::Positive)
        .count();
    info!(rows = table.len(), positives, "Screened uploaded table");

    let csv = table.into_augmented_csv(&labels)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Screen a single comma-separated feature vector.
async fn screen_vector(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VectorRequest>,
) -> Result<Json<VectorResponse>, ScreeningError> {
    state.session.ensure_active()?;

    let sample = parse_feature_vector(&request.values)?;
    let matrix = FeatureMatrix::from_samples(std::slice::from_ref(&sample));
    let labels = state.predictor.predict(&matrix)?;

    let label = labels
        .first()
        .copied()
        .ok_or_else(|| ScreeningError::Inference("model returned no label".to_string()))?;
    let diagnosis = Diagnosis::from_label(label);

    info!(%diagnosis, "Screened single vector");

    Ok(Json(VectorResponse {
        diagnosis,
        report: diagnosis.report_str(),
    }))
}

/// Serve one of the static informational panels.
async fn info_panel(Path(topic): Path<String>) -> Response {
    match InfoTopic::from_slug(&topic) {
        Some(topic) => Json(InfoResponse {
            topic: topic.slug(),
            title: topic.title(),
            content: topic.content(),
        })
        .into_response(),
        None => {
            let choices: Vec<&str> = InfoTopic::ALL.iter().map(|t| t.slug()).collect();
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!(
                        "unknown info topic {topic:?}; available topics: {}",
                        choices.join(", ")
                    ),
                }),
            )
                .into_response()
        }
    }
}

/// End the screening session. Screening endpoints reject every request
/// afterwards; the informational panel stays readable.
async fn quit(State(state): State<Arc<AppState>>) -> Json<QuitResponse> {
    state.session.end();
    info!("Screening session ended by quit request");
    Json(QuitResponse {
        message: "The screening session has ended. Restart the service to resume screening.",
    })
}

impl IntoResponse for ScreeningError {
    fn into_response(self) -> Response {
        let status = match &self {
            ScreeningError::MissingColumns(_) | ScreeningError::EmptyTable => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ScreeningError::InvalidCell { .. }
            | ScreeningError::WrongValueCount { .. }
            | ScreeningError::InvalidToken { .. }
            | ScreeningError::NonIntegralToken { .. }
            | ScreeningError::Csv(_) => StatusCode::BAD_REQUEST,
            ScreeningError::SessionEnded => StatusCode::CONFLICT,
            ScreeningError::InvalidArtifact(_)
            | ScreeningError::Inference(_)
            | ScreeningError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "Screening request failed");
        } else {
            warn!(error = %self, "Rejected screening request");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
