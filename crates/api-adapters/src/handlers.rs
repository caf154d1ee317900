//! # Handlers
//!
//! Coordinates the flow between HTTP requests and the services. Bodies are
//! `application/x-www-form-urlencoded`, matching the board's front end.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::{Form, Json};
use domains::models::{CreatorAddr, EntryId, ExportDocument, PublicEntry};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

/// Literal body of every successful mutation.
pub const OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub struct CreateEntryForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub note: String,
}

// Forms carrying a password deliberately do not derive Debug.

#[derive(Deserialize)]
pub struct DeleteEntryForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SetHiddenForm {
    #[serde(default)]
    pub id: String,
    pub hidden: bool,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct SetPinnedForm {
    #[serde(default)]
    pub id: String,
    pub pinned: bool,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct ExportForm {
    #[serde(default)]
    pub password: String,
}

/// `GET /api/entries`
pub async fn list_entries(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicEntry>>> {
    Ok(Json(state.entries.list_public().await?))
}

/// `POST /api/entries`
pub async fn create_entry(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Form(form): Form<CreateEntryForm>,
) -> ApiResult<(StatusCode, &'static str)> {
    state
        .entries
        .create(&form.text, &form.note, CreatorAddr::from(peer.ip()))
        .await?;
    Ok((StatusCode::CREATED, OK))
}

/// `POST /api/entries/delete`
pub async fn delete_entry(
    State(state): State<AppState>,
    Form(form): Form<DeleteEntryForm>,
) -> ApiResult<&'static str> {
    state
        .moderation
        .delete(&EntryId::from(form.id), &form.password)
        .await?;
    Ok(OK)
}

/// `POST /api/entries/hidden`
pub async fn set_hidden(
    State(state): State<AppState>,
    Form(form): Form<SetHiddenForm>,
) -> ApiResult<&'static str> {
    state
        .moderation
        .set_hidden(&EntryId::from(form.id), form.hidden, &form.password)
        .await?;
    Ok(OK)
}

/// `POST /api/entries/pinned`
pub async fn set_pinned(
    State(state): State<AppState>,
    Form(form): Form<SetPinnedForm>,
) -> ApiResult<&'static str> {
    state
        .moderation
        .set_pinned(&EntryId::from(form.id), form.pinned, &form.password)
        .await?;
    Ok(OK)
}

/// `POST /api/entries/export`
pub async fn export_entries(
    State(state): State<AppState>,
    Form(form): Form<ExportForm>,
) -> ApiResult<Json<ExportDocument>> {
    Ok(Json(state.moderation.export(&form.password).await?))
}

/// `GET /health`
pub async fn health() -> &'static str {
    OK
}
