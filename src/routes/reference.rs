//! Sportmonks lookups passed through with little or no reshaping.

use super::{Data, OrFail, RouteResult, data};
use crate::app::App;
use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;

const MATCH_INCLUDES: &str = "localteam,visitorteam,league,stage,venue,lineup,balls,scoreboards,\
batting,bowling,manofmatch,firstumpire,secondumpire,tvumpire,referee";

pub async fn match_detail(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Value>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("fixtures/{id}?include={MATCH_INCLUDES}"))
        .await
        .or_report("Error fetching match")?;
    Ok(Json(raw))
}

pub async fn team_rankings(State(app): State<App>) -> RouteResult<Json<Value>> {
    let raw = app
        .api
        .fetch_sportmonks("team-rankings")
        .await
        .or_report("Error fetching team rankings")?;
    Ok(Json(raw))
}

pub async fn venues(State(app): State<App>) -> RouteResult<Json<Value>> {
    let raw = app
        .api
        .fetch_sportmonks("venues")
        .await
        .or_report("Error fetching venues")?;
    Ok(Json(raw))
}

pub async fn venue(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Value>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("venues/{id}"))
        .await
        .or_report("Error fetching venue")?;
    Ok(Json(raw))
}

pub async fn stage(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("stages/{id}"))
        .await
        .or_fail("Stages not found")?;
    Ok(data(raw))
}

pub async fn countries(State(app): State<App>) -> RouteResult<Json<Value>> {
    let raw = app
        .api
        .fetch_sportmonks("countries")
        .await
        .or_report("Error fetching countries")?;
    Ok(Json(raw))
}

pub async fn country(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("countries/{id}"))
        .await
        .or_fail("Country not found")?;
    Ok(data(raw))
}

pub async fn player(State(app): State<App>, Path(id): Path<i64>) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("players/{id}?include=career,country,career.season"))
        .await
        .or_fail("Player not found")?;
    Ok(data(raw))
}

pub async fn player_name(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("players/{id}"))
        .await
        .or_fail("Player not found")?;
    Ok(data(raw))
}
