use super::{Data, OrFail, RouteError, RouteResult, data};
use crate::app::App;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use cricket_api::client::{DEFAULT_IMAGES_PATH, TOP_PLAYERS_PATH};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    q: Option<String>,
    max: Option<u32>,
}

pub async fn news(
    State(app): State<App>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> RouteResult<Json<Value>> {
    let Query(query) = query.map_err(|e| RouteError::bad_request(e.body_text()))?;
    // An empty `q` means the default topic, same as a missing one.
    let q = query.q.as_deref().filter(|q| !q.is_empty());
    let body = app
        .api
        .fetch_news(q, query.max)
        .await
        .or_fail("Failed to fetch news")?;
    Ok(Json(body))
}

pub async fn default_images(State(app): State<App>) -> RouteResult<impl IntoResponse> {
    let text = app
        .api
        .fetch_asset_text(DEFAULT_IMAGES_PATH)
        .await
        .or_fail("Failed to load default images")?;
    Ok(plain_text(text))
}

pub async fn default_player_images(State(app): State<App>) -> RouteResult<impl IntoResponse> {
    let text = app
        .api
        .fetch_asset_text(TOP_PLAYERS_PATH)
        .await
        .or_fail("Failed to load default player images")?;
    Ok(plain_text(text))
}

pub async fn players(State(app): State<App>) -> RouteResult<Json<Data<Value>>> {
    let api = &app.api;
    let players = app
        .players
        .get_or_fetch(move || api.fetch_players())
        .await
        .or_fail("Failed to load player data")?;
    Ok(data(players))
}

fn plain_text(text: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text)
}
