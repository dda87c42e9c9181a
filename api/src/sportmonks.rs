//! Sportmonks cricket API raw wire types — serde shapes for deserializing responses.
//! Fields the site never inspects are kept in `extra` so records can be re-emitted
//! to the front-end untouched.
use crate::window::parse_timestamp;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Every Sportmonks response wraps its payload in `data`.
#[derive(Debug, Deserialize, Clone)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Fixture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<League>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_at: Option<String>, // ISO 8601, e.g. "2026-02-01T09:30:00.000000Z"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localteam_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitorteam_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localteam: Option<TeamRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitorteam: Option<TeamRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Fixture {
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.starting_at.as_deref().and_then(parse_timestamp)
    }

    /// An upstream field this type does not model, `None` when absent.
    pub fn extra_field(&self, key: &str) -> Option<Value> {
        self.extra.get(key).cloned()
    }

    pub fn involves_team(&self, team_id: i64) -> bool {
        self.localteam_id == Some(team_id) || self.visitorteam_id == Some(team_id)
    }
}

// Upstream sends `null` for ids and names it does not know, so every field is
// optional and absent ones are left out when re-emitted.

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct League {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>, // "T20", "ODI", "Test/5day", ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Season {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only present with `include=league`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub league: Option<League>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Stage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // "Regular Season", "Play Off", "Final"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub stage_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct TeamRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Venue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Teams  (teams/{id}?include=fixtures,results)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamWithFixtures {
    #[serde(default)]
    pub fixtures: Option<Vec<Fixture>>,
    #[serde(default)]
    pub results: Option<Vec<Fixture>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamSquad {
    pub squad: Option<Value>,
}
