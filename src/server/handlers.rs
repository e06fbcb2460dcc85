use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationReply, ConversationRequest, TranslateRequest, TranslateResponse};
use crate::languages::{LanguageOption, DEFAULT_TARGET_LANGUAGE, SUPPORTED_LANGUAGES};
use crate::persona::{Persona, DEFAULT_PERSONA_ID, PRESET_PERSONAS};

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether conversation replies come from the language model.
    pub llm_configured: bool,
}

#[derive(Serialize)]
pub struct LanguagesResponse {
    languages: &'static [LanguageOption],
    default: &'static str,
}

#[derive(Serialize)]
pub struct CharactersResponse {
    characters: &'static [Persona],
    default: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        llm_configured: state.service.generator_configured(),
    })
}

pub async fn languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: SUPPORTED_LANGUAGES,
        default: DEFAULT_TARGET_LANGUAGE,
    })
}

pub async fn characters() -> Json<CharactersResponse> {
    Json(CharactersResponse {
        characters: PRESET_PERSONAS,
        default: DEFAULT_PERSONA_ID,
    })
}

pub async fn translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = body?;
    let result = state.service.translate(request).await?;
    Ok(Json(TranslateResponse { result }))
}

pub async fn conversation(
    State(state): State<AppState>,
    body: Result<Json<ConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationReply>, ApiError> {
    let Json(request) = body?;
    let reply = state.service.converse(request).await?;
    Ok(Json(reply))
}
