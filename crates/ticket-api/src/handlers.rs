//! API Handlers
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use ticket_verify::{VerificationResponse, VerifyRequest};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{error::AppError, AppState};

/// Body of `POST /v1/verify`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPayload {
    pub ticket_identifier: Option<String>,
    /// Ticket text, when the client already ran OCR
    #[serde(default)]
    pub ticket_text: Option<String>,
    #[serde(default)]
    pub reference_time: Option<DateTime<Utc>>,
    /// Review the ticket backs; only used for tracing
    #[serde(default)]
    pub review_id: Option<String>,
}

impl VerifyPayload {
    fn to_request(&self) -> VerifyRequest {
        VerifyRequest {
            ticket_identifier: self.ticket_identifier.clone(),
            ticket_text: self.ticket_text.clone(),
            reference_time: self.reference_time,
            ticket_date: None,
        }
    }
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerifyPayload>, JsonRejection>,
) -> Result<Json<VerificationResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected verification payload");
        AppError::MalformedPayload
    })?;

    let request_id = Uuid::new_v4();
    let result = state.verifier.verify(&payload.to_request());
    state.metrics.record(result.status);

    info!(
        %request_id,
        review_id = payload.review_id.as_deref().unwrap_or("-"),
        status = %result.status,
        "ticket verification served"
    );

    Ok(Json(result.into()))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
    )
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<String, AppError> {
    Ok(state.metrics.encode()?)
}
