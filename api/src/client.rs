use crate::news::{DEFAULT_MAX, DEFAULT_QUERY, to_search_query};
use crate::series::group_series;
use crate::sportmonks::{Envelope, Fixture, Season, TeamSquad, TeamWithFixtures};
use crate::window::{
    DATE_FORMAT, DATETIME_FORMAT, DateWindow, SCHEDULE_DAYS_AHEAD, SCHEDULE_DAYS_BACK,
    SERIES_DAYS_AHEAD, SERIES_DAYS_BACK, TEAM_MATCHES_DAYS_AHEAD, TEAM_MATCHES_DAYS_BACK,
};
use crate::{ScheduledMatch, Series, SquadEntry, TeamSeries};
use chrono::{DateTime, Utc};
use futures_util::future::try_join;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const SPORTMONKS_URL: &str = "https://cricket.sportmonks.com/api/v2.0";
pub const GNEWS_URL: &str = "https://gnews.io/api/v4";
pub const ASSETS_URL: &str = "https://raw.githubusercontent.com/ashwint87/cricket-website/master/";

pub const DEFAULT_IMAGES_PATH: &str = "live_cricket_website_default_image_urls";
pub const TOP_PLAYERS_PATH: &str = "top_players";
const PLAYERS_PATH: &str = "players.json";

const SCHEDULE_INCLUDES: &str = "localteam,visitorteam,venue,manofmatch,runs,league,stage,tosswon";
const SERIES_INCLUDES: &str = "stage,season,league";
const SERIES_MATCH_INCLUDES: &str = "localteam,visitorteam,venue,runs,tosswon,stage";
const SQUAD_SCAN_INCLUDES: &str = "stage,season,venue,localteam,visitorteam";
const LIVE_INCLUDES: &str = "localteam,visitorteam,league,venue,runs,stage";

/// Upstream endpoints and credentials. Base URLs are overridable so a local
/// mock can stand in for the real services.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub sportmonks_url: String,
    pub sportmonks_token: String,
    pub gnews_url: String,
    pub gnews_key: String,
    /// Must end with `/`; file names are appended directly.
    pub assets_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            sportmonks_url: SPORTMONKS_URL.into(),
            sportmonks_token: String::new(),
            gnews_url: GNEWS_URL.into(),
            gnews_key: String::new(),
            assets_url: ASSETS_URL.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Cricket data client backed by Sportmonks, GNews and the GitHub asset feed.
#[derive(Debug, Clone)]
pub struct CricketApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl CricketApi {
    pub fn with_config(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("cricket-site/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Full Sportmonks URL for `endpoint` with the API token attached.
    pub fn sportmonks_url(&self, endpoint: &str) -> String {
        let sep = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}/{endpoint}{sep}api_token={}",
            self.config.sportmonks_url.trim_end_matches('/'),
            self.config.sportmonks_token
        )
    }

    /// Raw Sportmonks response body, for routes that pass it through as-is.
    pub async fn fetch_sportmonks(&self, endpoint: &str) -> ApiResult<Value> {
        self.get(&self.sportmonks_url(endpoint)).await
    }

    /// Fixtures from ten days ago to 75 days ahead, trimmed for the schedule page.
    pub async fn fetch_schedule(&self, now: DateTime<Utc>) -> ApiResult<Vec<ScheduledMatch>> {
        let window = DateWindow::around(now, SCHEDULE_DAYS_BACK, SCHEDULE_DAYS_AHEAD);
        let endpoint = format!(
            "fixtures?{}&include={SCHEDULE_INCLUDES}",
            window.starts_between(DATE_FORMAT)
        );
        let fixtures = self.fetch_fixtures(&endpoint).await?;
        Ok(fixtures.into_iter().map(ScheduledMatch::from).collect())
    }

    /// Series running from 30 days ago to 300 days ahead.
    ///
    /// The range is too wide for one upstream query, so the past and future
    /// halves are requested concurrently. Both must succeed.
    pub async fn fetch_series(&self, now: DateTime<Utc>) -> ApiResult<Vec<Series>> {
        let (past, future) =
            DateWindow::around(now, SERIES_DAYS_BACK, SERIES_DAYS_AHEAD).split_at(now);
        let endpoint = |w: DateWindow| {
            format!(
                "fixtures?{}&include={SERIES_INCLUDES}",
                w.starts_between(DATETIME_FORMAT)
            )
        };
        let (past_endpoint, future_endpoint) = (endpoint(past), endpoint(future));

        let (mut fixtures, upcoming) = try_join(
            self.fetch_fixtures(&past_endpoint),
            self.fetch_fixtures(&future_endpoint),
        )
        .await?;
        fixtures.extend(upcoming);

        debug!("grouping {} fixtures into series", fixtures.len());
        Ok(group_series(&fixtures))
    }

    /// Every fixture of the given stages, earliest first.
    pub async fn fetch_series_matches(&self, stage_ids: &[i64]) -> ApiResult<Vec<Fixture>> {
        let mut matches = Vec::new();
        for stage_id in stage_ids {
            let endpoint =
                format!("fixtures?filter[stage_id]={stage_id}&include={SERIES_MATCH_INCLUDES}");
            matches.extend(self.fetch_fixtures(&endpoint).await?);
        }
        // Undated fixtures sort last.
        matches.sort_by_key(|f| {
            let start = f.start_time();
            (start.is_none(), start)
        });
        Ok(matches)
    }

    /// Squads of every team playing in the same competition as `stage_id`.
    ///
    /// A competition is approximated by fixtures in the team-matches window
    /// sharing the stage name and venue country of the first fixture found
    /// for the stage.
    pub async fn fetch_series_squads(
        &self,
        stage_id: i64,
        now: DateTime<Utc>,
    ) -> ApiResult<Vec<SquadEntry>> {
        let window = DateWindow::around(now, TEAM_MATCHES_DAYS_BACK, TEAM_MATCHES_DAYS_AHEAD);
        let endpoint = format!(
            "fixtures?{}&include={SQUAD_SCAN_INCLUDES}",
            window.starts_between(DATE_FORMAT)
        );
        let fixtures = self.fetch_fixtures(&endpoint).await?;

        let Some(clicked) = fixtures
            .iter()
            .find(|f| f.stage.as_ref().is_some_and(|s| s.id == Some(stage_id)))
        else {
            return Ok(Vec::new());
        };
        let stage_name = |f: &Fixture| {
            f.stage
                .as_ref()
                .and_then(|s| s.name.as_ref())
                .map(|n| n.to_lowercase())
        };
        let country = |f: &Fixture| {
            f.venue
                .as_ref()
                .and_then(|v| v.country.as_ref())
                .map(|c| c.to_lowercase())
        };
        let (target_name, target_country) = (stage_name(clicked), country(clicked));

        let mut seen: HashSet<(i64, i64)> = HashSet::new();
        let mut squads = Vec::new();
        for fixture in fixtures
            .iter()
            .filter(|&f| stage_name(f) == target_name && country(f) == target_country)
        {
            let Some(season_id) = fixture.season.as_ref().and_then(|s| s.id) else {
                continue;
            };
            for team in [&fixture.localteam, &fixture.visitorteam].into_iter().flatten() {
                let Some(team_id) = team.id else { continue };
                if !seen.insert((team_id, season_id)) {
                    continue;
                }
                let squad = self.fetch_team_squad(team_id, season_id).await?;
                squads.push(SquadEntry {
                    team_id,
                    team_name: team.name.clone(),
                    season_id,
                    squad: squad
                        .and_then(|s| s.squad)
                        .unwrap_or_else(|| Value::Array(Vec::new())),
                });
            }
        }
        Ok(squads)
    }

    /// `teams/{team}/squad/{season}`, unwrapped from its envelope.
    pub async fn fetch_team_squad_raw(&self, team_id: i64, season_id: i64) -> ApiResult<Value> {
        let raw = self
            .fetch_sportmonks(&format!("teams/{team_id}/squad/{season_id}"))
            .await?;
        Ok(raw.get("data").cloned().unwrap_or(Value::Null))
    }

    async fn fetch_team_squad(&self, team_id: i64, season_id: i64) -> ApiResult<Option<TeamSquad>> {
        let url = self.sportmonks_url(&format!("teams/{team_id}/squad/{season_id}"));
        let raw: Envelope<TeamSquad> = self.get(&url).await?;
        Ok(raw.data)
    }

    /// A team's fixtures and results within 45 days back / 75 ahead, latest first.
    pub async fn fetch_team_matches(
        &self,
        team_id: i64,
        now: DateTime<Utc>,
    ) -> ApiResult<Vec<Fixture>> {
        let url = self.sportmonks_url(&format!("teams/{team_id}?include=fixtures,results"));
        let raw: Envelope<TeamWithFixtures> = self.get(&url).await?;
        let team = raw
            .data
            .ok_or_else(|| ApiError::NotFound(format!("team {team_id}")))?;

        let window = DateWindow::around(now, TEAM_MATCHES_DAYS_BACK, TEAM_MATCHES_DAYS_AHEAD);
        let mut matches: Vec<Fixture> = team
            .fixtures
            .unwrap_or_default()
            .into_iter()
            .chain(team.results.unwrap_or_default())
            .filter(|f| f.start_time().is_some_and(|ts| window.contains_exclusive(ts)))
            .collect();
        matches.sort_by_key(|f| std::cmp::Reverse(f.start_time()));
        Ok(matches)
    }

    /// Seasons the team has fixtures in, each labelled with its league.
    pub async fn fetch_team_series(&self, team_id: i64) -> ApiResult<Vec<TeamSeries>> {
        let url = self.sportmonks_url(&format!("teams/{team_id}?include=fixtures"));
        let raw: Envelope<TeamWithFixtures> = self.get(&url).await?;
        let fixtures = raw.data.and_then(|t| t.fixtures).unwrap_or_default();

        let mut season_ids: Vec<i64> = Vec::new();
        for id in fixtures.iter().filter_map(|f| f.season_id).filter(|id| *id != 0) {
            if !season_ids.contains(&id) {
                season_ids.push(id);
            }
        }

        let mut series = Vec::new();
        for season_id in season_ids {
            let url = self.sportmonks_url(&format!("seasons/{season_id}?include=league"));
            let raw: Envelope<Season> = self.get(&url).await?;
            let Some(season) = raw.data else { continue };
            let Some(league) = season.league else { continue };
            series.push(TeamSeries {
                id: league.id,
                name: season.name,
                league: league.name,
                season_id,
            });
        }
        Ok(series)
    }

    /// Live fixtures the team is playing in.
    pub async fn fetch_live_matches(&self, team_id: i64) -> ApiResult<Vec<Fixture>> {
        let endpoint = format!("livescores?include={LIVE_INCLUDES}");
        let live = self.fetch_fixtures(&endpoint).await?;
        Ok(live.into_iter().filter(|f| f.involves_team(team_id)).collect())
    }

    /// GNews search. The query is reduced to plain words first.
    pub async fn fetch_news(&self, query: Option<&str>, max: Option<u32>) -> ApiResult<Value> {
        let q = to_search_query(query.unwrap_or(DEFAULT_QUERY));
        let url = format!(
            "{}/search?q={q}&lang=en&max={}&apikey={}",
            self.config.gnews_url.trim_end_matches('/'),
            max.unwrap_or(DEFAULT_MAX),
            self.config.gnews_key
        );
        self.get(&url).await
    }

    /// A plain-text file from the asset feed.
    pub async fn fetch_asset_text(&self, path: &str) -> ApiResult<String> {
        let url = format!("{}{path}", self.config.assets_url);
        let redacted = self.redact(&url);
        debug!("GET {redacted}");
        self.send(&url)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Parsing(e.without_url(), redacted))
    }

    /// The full player list published on the asset feed.
    pub async fn fetch_players(&self) -> ApiResult<Value> {
        self.get(&format!("{}{PLAYERS_PATH}", self.config.assets_url))
            .await
    }

    async fn fetch_fixtures(&self, endpoint: &str) -> ApiResult<Vec<Fixture>> {
        let raw: Envelope<Vec<Fixture>> = self.get(&self.sportmonks_url(endpoint)).await?;
        Ok(raw.data.unwrap_or_default())
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let redacted = self.redact(url);
        debug!("GET {redacted}");
        self.send(url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e.without_url(), redacted))
    }

    async fn send(&self, url: &str) -> ApiResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.without_url(), self.redact(url)))?;

        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e.without_url(), self.redact(url)))
    }

    /// The URL with credentials masked, safe for logs and error bodies.
    fn redact(&self, url: &str) -> String {
        let mut out = url.to_owned();
        for secret in [&self.config.sportmonks_token, &self.config.gnews_key] {
            if !secret.is_empty() {
                out = out.replace(secret.as_str(), "***");
            }
        }
        out
    }
}
