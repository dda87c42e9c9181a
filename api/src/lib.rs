pub mod client;
pub mod news;
pub mod series;
pub mod sportmonks;
pub mod window;

use crate::sportmonks::{Fixture, League, Stage, TeamRef, Venue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Domain types — what the site serves, independent of the Sportmonks wire format
// ---------------------------------------------------------------------------

/// A logical competition as shown to users. May span several upstream stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub name: Option<String>,
    pub league_id: Option<i64>,
    pub league: Option<String>,
    pub season_id: Option<i64>,
    pub season: Option<String>,
    pub code: String,
    pub start_date: Option<String>, // "3 January 2026"
    pub end_date: Option<String>,
}

/// Scalar for a single stage, list when stages were merged (regular + play-off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesId {
    Single(i64),
    Merged(Vec<i64>),
}

impl SeriesId {
    pub fn from_stage_ids(mut ids: Vec<i64>) -> Self {
        if ids.len() == 1 {
            SeriesId::Single(ids.remove(0))
        } else {
            SeriesId::Merged(ids)
        }
    }
}

/// One row of the home-page schedule.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduledMatch {
    pub id: Option<i64>,
    pub league_id: Option<i64>,
    pub season_id: Option<i64>,
    pub league: Option<League>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<Value>,
    pub localteam: Option<TeamRef>,
    pub visitorteam: Option<TeamRef>,
    pub venue: Option<Venue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manofmatch: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Value>,
    pub starting_at: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub match_type: Option<Value>,
    pub stage: Option<Stage>,
    pub stage_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elected: Option<Value>,
    pub toss_won_team_id: Option<Value>,
}

impl From<Fixture> for ScheduledMatch {
    fn from(f: Fixture) -> Self {
        let toss_won_team_id = f
            .extra
            .get("tosswon")
            .and_then(|t| t.get("id"))
            .cloned();
        ScheduledMatch {
            id: f.id,
            league_id: f.league.as_ref().and_then(|l| l.id),
            season_id: f.season_id,
            round: f.extra_field("round"),
            manofmatch: f.extra_field("manofmatch"),
            runs: f.extra_field("runs"),
            status: f.extra_field("status"),
            note: f.extra_field("note"),
            match_type: f.extra_field("type"),
            elected: f.extra_field("elected"),
            toss_won_team_id,
            league: f.league,
            localteam: f.localteam,
            visitorteam: f.visitorteam,
            venue: f.venue,
            starting_at: f.starting_at,
            stage: f.stage,
            stage_id: f.stage_id,
        }
    }
}

/// A season a team has fixtures in, labelled with its league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSeries {
    pub id: Option<i64>, // league id
    pub name: Option<String>,
    pub league: Option<String>,
    pub season_id: i64,
}

/// A team's squad for one season, as listed on a series page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquadEntry {
    pub team_id: i64,
    pub team_name: Option<String>,
    pub season_id: i64,
    pub squad: Value,
}
