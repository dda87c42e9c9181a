use super::{Data, OrFail, RouteResult, data};
use crate::app::App;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use cricket_api::TeamSeries;
use cricket_api::sportmonks::Fixture;
use serde_json::Value;

pub async fn list(State(app): State<App>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks("teams")
        .await
        .or_fail("Failed to fetch teams")?;
    Ok(data(raw))
}

pub async fn detail(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("teams/{id}"))
        .await
        .or_fail("Team not found")?;
    Ok(data(raw))
}

pub async fn matches(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Vec<Fixture>>>> {
    let matches = app
        .api
        .fetch_team_matches(id, Utc::now())
        .await
        .or_fail("Failed to fetch team matches")?;
    Ok(data(matches))
}

pub async fn live_matches(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Vec<Fixture>>>> {
    let live = app
        .api
        .fetch_live_matches(id)
        .await
        .or_fail("Live matches not found")?;
    Ok(data(live))
}

pub async fn series(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Vec<TeamSeries>>>> {
    let series = app
        .api
        .fetch_team_series(id)
        .await
        .or_fail("Failed to fetch team series")?;
    Ok(data(series))
}

pub async fn season_squad(
    State(app): State<App>,
    Path((id, season_id)): Path<(i64, i64)>,
) -> RouteResult<Json<Data<Value>>> {
    let squad = app
        .api
        .fetch_team_squad_raw(id, season_id)
        .await
        .or_fail("Failed to fetch team squad")?;
    Ok(data(squad))
}

pub async fn squads(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("teams/{id}?include=squad"))
        .await
        .or_fail("Team squad not found")?;
    Ok(data(raw))
}
