//! Enhancement Proxy — identity-gated pass-through to the LLM client.
//!
//! No state or algorithm of its own: the handler resolves identity first
//! and short-circuits unauthenticated callers with a login redirect before
//! any LLM call is attempted.

pub mod prompts;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{ensure_authenticated, MaybeUser};
use crate::errors::AppError;
use crate::resume::sections::SectionKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub content: String,
    pub section: SectionKind,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced: String,
}

/// POST /api/v1/enhance
pub async fn handle_enhance(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    ensure_authenticated(user.0)?;

    if req.content.trim().is_empty() {
        return Err(AppError::Validation("content is required".to_string()));
    }

    let enhanced = state
        .llm
        .call_text(&req.content, &prompts::system_for(req.section))
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(EnhanceResponse { enhanced }))
}
