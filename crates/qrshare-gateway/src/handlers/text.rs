use crate::error::Result;
use crate::model::PublishRequest;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use qrshare_core::{Published, PublishedText};

pub async fn publish_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PublishRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Published>)> {
    let Json(request) = payload?;
    let published = state.publisher().publish(request.into()).await?;
    Ok((StatusCode::CREATED, Json(published)))
}

pub async fn get_text_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PublishedText>> {
    let record = state.publisher().resolve(&alias).await?;
    Ok(Json(record))
}
