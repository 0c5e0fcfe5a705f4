//! Read-only standings endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::instrument;

use house_points_scoring::application::query_handlers::{self, StandingsView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/v1/standings
#[instrument(skip(state))]
async fn get_standings(State(state): State<AppState>) -> Result<Json<StandingsView>, ApiError> {
    let view = query_handlers::get_standings_view(state.dispatcher.store()).await?;
    Ok(Json(view))
}

/// Returns the router for the standings resource.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_standings))
}
