//! Axum route handlers for the builder and workshop sessions.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{optional_json, AppError, AppJson};
use crate::gem::builder::{BuilderUpdate, GuidedBuilder, RenderedSlot, Slot};
use crate::gem::configuration::{Change, Configuration};
use crate::gem::workshop::Workshop;
use crate::render::workshop::render_workshop;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateBuilderRequest {
    /// Slots the host page exposes. Defaults to all seven.
    pub slots: Option<Vec<Slot>>,
}

#[derive(Debug, Serialize)]
pub struct CreateBuilderResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub slots: Vec<RenderedSlot>,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<RenderedSlot>,
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct FormInputRequest {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ToneSelectRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ExampleQuestionRequest {
    pub target: usize,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct RevealRequest {
    pub slot: Slot,
}

#[derive(Debug, Serialize)]
pub struct RevealResponse {
    pub first_reveal: bool,
}

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    pub copied: bool,
    pub label: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CopyButtonResponse {
    pub label: String,
    pub acknowledged: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenWorkshopRequest {
    /// Builder session whose configuration seeds the sections.
    pub builder_session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct WorkshopResponse {
    pub session_id: Uuid,
    pub html: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct WorkshopCreatedResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub from_builder: bool,
    pub html: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub session_id: Uuid,
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub index: usize,
    pub expanded: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/builder
///
/// Creates a builder session for a host page and initializes it. An empty
/// body declares all seven slots; an unknown slot name is a 400.
pub async fn handle_create_builder(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateBuilderResponse>), AppError> {
    let request: CreateBuilderRequest = optional_json(&body)?;
    let host_slots = request.slots.unwrap_or_else(|| Slot::ALL.to_vec());

    let mut builder = GuidedBuilder::new(host_slots);
    let slots = builder.initialize();
    let output = builder.preview().to_string();

    let (session_id, created_at) = state.sessions.insert_builder(builder).await;
    info!(%session_id, "builder session created");

    Ok((
        StatusCode::CREATED,
        Json(CreateBuilderResponse {
            session_id,
            created_at,
            slots,
            output,
        }),
    ))
}

/// POST /api/v1/builder/:id/init
pub async fn handle_initialize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotsResponse>, AppError> {
    let response = state
        .sessions
        .with_builder(id, |b| {
            debug!(%id, already_bound = b.is_bound(), "re-initializing builder");
            SlotsResponse {
                slots: b.initialize(),
                output: b.preview().to_string(),
            }
        })
        .await?;
    Ok(Json(response))
}

/// GET /api/v1/builder/:id/slots/:slot
///
/// Returns one slot's markup. A slot the host page did not declare is 404.
pub async fn handle_render_slot(
    State(state): State<AppState>,
    Path((id, slot)): Path<(Uuid, String)>,
) -> Result<Html<String>, AppError> {
    let slot: Slot = slot.parse()?;
    let html = state
        .sessions
        .with_builder(id, |b| b.render_slot(slot))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Slot '{slot}' is not on this page")))?;
    Ok(Html(html))
}

/// GET /api/v1/builder/:id/config
pub async fn handle_get_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Configuration>, AppError> {
    let config = state
        .sessions
        .with_builder(id, |b| b.configuration().clone())
        .await?;
    Ok(Json(config))
}

/// POST /api/v1/builder/:id/input
///
/// Body: `{"field": "toneIntensity", "value": 7}`.
pub async fn handle_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(change): AppJson<Change>,
) -> Result<Json<BuilderUpdate>, AppError> {
    debug!(%id, ?change, "builder input");
    let update = state
        .sessions
        .with_builder(id, |b| b.handle_input(change))
        .await?;
    Ok(Json(update))
}

/// POST /api/v1/builder/:id/form
///
/// Body: `{"name": "builder-question-1", "value": "..."}` as reported by the form control.
pub async fn handle_form_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<FormInputRequest>,
) -> Result<Json<BuilderUpdate>, AppError> {
    let update = state
        .sessions
        .with_builder(id, |b| b.handle_form_input(&request.name, &request.value))
        .await??;
    Ok(Json(update))
}

/// POST /api/v1/builder/:id/tone
pub async fn handle_tone_select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<ToneSelectRequest>,
) -> Result<Json<BuilderUpdate>, AppError> {
    let update = state
        .sessions
        .with_builder(id, |b| b.handle_tone_select(&request.value))
        .await?;
    Ok(Json(update))
}

/// POST /api/v1/builder/:id/example
pub async fn handle_example_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<ExampleQuestionRequest>,
) -> Result<Json<BuilderUpdate>, AppError> {
    let update = state
        .sessions
        .with_builder(id, |b| b.apply_example_question(request.target, request.index))
        .await??;
    Ok(Json(update))
}

/// POST /api/v1/builder/:id/reveal
pub async fn handle_reveal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<RevealRequest>,
) -> Result<Json<RevealResponse>, AppError> {
    let first_reveal = state
        .sessions
        .with_builder(id, |b| b.mark_revealed(request.slot))
        .await?;
    Ok(Json(RevealResponse { first_reveal }))
}

/// POST /api/v1/builder/:id/copy
///
/// Writes the current preview to the clipboard. A failed write is still a 200
/// with `copied: false`.
pub async fn handle_builder_copy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CopyResponse>, AppError> {
    let (text, button) = state
        .sessions
        .with_builder(id, |b| (b.copy_payload(), b.copy_button().clone()))
        .await?;

    let copied = button.copy(state.clipboard.as_ref(), text.clone()).await;
    Ok(Json(CopyResponse {
        copied,
        label: button.label().to_string(),
        text,
    }))
}

/// GET /api/v1/builder/:id/copy-button
pub async fn handle_builder_copy_button(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CopyButtonResponse>, AppError> {
    let response = state
        .sessions
        .with_builder(id, |b| CopyButtonResponse {
            label: b.copy_button().label().to_string(),
            acknowledged: b.copy_button().is_acknowledged(),
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/builder/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotsResponse>, AppError> {
    let response = state
        .sessions
        .with_builder(id, |b| SlotsResponse {
            slots: b.reset(),
            output: b.preview().to_string(),
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/builder/:id
pub async fn handle_delete_builder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove_builder(id).await?;
    info!(%id, "builder session ended");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Workshop handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workshop
///
/// Opens a workshop. The named builder's configuration is copied once; a
/// missing or unknown builder falls back to the defaults.
pub async fn handle_open_workshop(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<WorkshopCreatedResponse>), AppError> {
    let request: OpenWorkshopRequest = optional_json(&body)?;

    let snapshot = match request.builder_session_id {
        Some(builder_id) => state
            .sessions
            .with_builder(builder_id, |b| b.configuration().clone())
            .await
            .ok(),
        None => None,
    };

    let workshop = Workshop::open(snapshot.as_ref());
    let html = render_workshop(&workshop);
    let output = workshop.preview().to_string();

    let (session_id, created_at) = state.sessions.insert_workshop(workshop).await;
    info!(%session_id, from_builder = snapshot.is_some(), "workshop session opened");

    Ok((
        StatusCode::CREATED,
        Json(WorkshopCreatedResponse {
            session_id,
            created_at,
            from_builder: snapshot.is_some(),
            html,
            output,
        }),
    ))
}

/// GET /api/v1/workshop/:id
pub async fn handle_get_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkshopResponse>, AppError> {
    let response = state
        .sessions
        .with_workshop(id, |w| WorkshopResponse {
            session_id: id,
            html: render_workshop(w),
            output: w.preview().to_string(),
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/workshop/:id/sections/:index/toggle
pub async fn handle_toggle_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<ToggleResponse>, AppError> {
    let expanded = state
        .sessions
        .with_workshop(id, |w| w.toggle_section_expanded(index))
        .await??;
    Ok(Json(ToggleResponse { index, expanded }))
}

/// PUT /api/v1/workshop/:id/sections/:index
///
/// Replaces the section text exactly and returns the recomputed preview.
pub async fn handle_edit_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    AppJson(request): AppJson<EditTextRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let output = state
        .sessions
        .with_workshop(id, |w| {
            w.edit_section(index, request.text)
                .map(|_| w.preview().to_string())
        })
        .await??;
    Ok(Json(PreviewResponse {
        session_id: id,
        output,
    }))
}

/// PUT /api/v1/workshop/:id/special
pub async fn handle_edit_special(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<EditTextRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let output = state
        .sessions
        .with_workshop(id, |w| {
            w.edit_special_instructions(request.text);
            w.preview().to_string()
        })
        .await?;
    Ok(Json(PreviewResponse {
        session_id: id,
        output,
    }))
}

/// POST /api/v1/workshop/:id/copy
pub async fn handle_workshop_copy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CopyResponse>, AppError> {
    let (text, button) = state
        .sessions
        .with_workshop(id, |w| (w.copy_payload(), w.copy_button().clone()))
        .await?;

    let copied = button.copy(state.clipboard.as_ref(), text.clone()).await;
    Ok(Json(CopyResponse {
        copied,
        label: button.label().to_string(),
        text,
    }))
}

/// GET /api/v1/workshop/:id/copy-button
pub async fn handle_workshop_copy_button(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CopyButtonResponse>, AppError> {
    let response = state
        .sessions
        .with_workshop(id, |w| CopyButtonResponse {
            label: w.copy_button().label().to_string(),
            acknowledged: w.copy_button().is_acknowledged(),
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/workshop/:id
pub async fn handle_delete_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove_workshop(id).await?;
    info!(%id, "workshop session ended");
    Ok(StatusCode::NO_CONTENT)
}
