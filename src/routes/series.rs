use super::{Data, OrFail, RouteError, RouteResult, data};
use crate::app::App;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use cricket_api::sportmonks::Fixture;
use cricket_api::{ScheduledMatch, SquadEntry};
use serde_json::Value;

pub async fn schedule(State(app): State<App>) -> RouteResult<Json<Data<Vec<ScheduledMatch>>>> {
    let matches = app
        .api
        .fetch_schedule(Utc::now())
        .await
        .or_report("Error fetching matches")?;
    Ok(data(matches))
}

pub async fn list(State(app): State<App>) -> RouteResult<Json<Data<Vec<cricket_api::Series>>>> {
    let series = app
        .api
        .fetch_series(Utc::now())
        .await
        .or_report("Error fetching series")?;
    Ok(data(series))
}

/// `ids` is one stage id or a comma-separated list, as produced for merged series.
pub async fn matches(
    State(app): State<App>,
    Path(ids): Path<String>,
) -> RouteResult<Json<Data<Data<Vec<Fixture>>>>> {
    let stage_ids = parse_stage_ids(&ids)?;
    let matches = app
        .api
        .fetch_series_matches(&stage_ids)
        .await
        .or_report("Error fetching series matches")?;
    Ok(data(Data { data: matches }))
}

pub async fn standings(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Value>>> {
    let raw = app
        .api
        .fetch_sportmonks(&format!("standings/stage/{id}"))
        .await
        .or_report("Error fetching series standings")?;
    Ok(data(raw))
}

pub async fn squads(
    State(app): State<App>,
    Path(id): Path<i64>,
) -> RouteResult<Json<Data<Vec<SquadEntry>>>> {
    let squads = app
        .api
        .fetch_series_squads(id, Utc::now())
        .await
        .or_report("Error fetching series squads")?;
    Ok(data(squads))
}

fn parse_stage_ids(raw: &str) -> RouteResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| RouteError::bad_request(format!("invalid stage id: {s}")))
        })
        .collect()
}
