use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{error::ApiError, movies::dto::MovieResponse, movies::repo, state::AppState};

pub fn movie_routes() -> Router<AppState> {
    Router::new().route("/movies", get(list_movies))
}

#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    let movies = repo::list_all(&state.db).await.map_err(ApiError::Database)?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}
