//! Notification intake

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{body::Bytes, extract::State, http::StatusCode};

/// Accept one pushed notification
///
/// Responds once the document is on the hand-off queue.
pub async fn collect(State(state): State<AppState>, body: Bytes) -> ApiResult<StatusCode> {
    state.collector.collect(body).await?;
    Ok(StatusCode::OK)
}
