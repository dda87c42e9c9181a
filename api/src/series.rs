use crate::sportmonks::Fixture;
use crate::window::display_date;
use crate::{Series, SeriesId};
use chrono::{DateTime, FixedOffset};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// League codes of single-format competitions. Their stages are never merged.
pub const IGNORED_FORMAT_CODES: [&str; 8] =
    ["T20", "T10", "ODI", "T20I", "4day", "Test", "Test/5day", "List A"];

const REGULAR_MARKER: &str = "regular";
const PLAYOFF_MARKER: &str = "play off";

pub fn is_ignored_format(code: &str) -> bool {
    IGNORED_FORMAT_CODES.contains(&code)
}

/// Earliest and latest fixture start seen for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StageWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl StageWindow {
    fn at(ts: DateTime<FixedOffset>) -> Self {
        Self { start: ts, end: ts }
    }

    fn widen(&mut self, ts: DateTime<FixedOffset>) {
        if ts < self.start {
            self.start = ts;
        }
        if ts > self.end {
            self.end = ts;
        }
    }

    fn union(self, other: StageWindow) -> StageWindow {
        StageWindow {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Fixed by the first fixture seen for the stage.
#[derive(Debug, Clone)]
struct StageSummary {
    id: i64,
    name: Option<String>,
    league_id: Option<i64>,
    league_name: Option<String>,
    season_id: Option<i64>,
    season_name: Option<String>,
    code: String,
}

impl StageSummary {
    fn lowercase_name(&self) -> String {
        self.name.as_deref().unwrap_or_default().to_lowercase()
    }

    fn to_series(&self, id: SeriesId, window: Option<StageWindow>) -> Series {
        Series {
            id,
            name: self.name.clone(),
            league_id: self.league_id,
            league: self.league_name.clone(),
            season_id: self.season_id,
            season: self.season_name.clone(),
            code: self.code.clone(),
            start_date: window.map(|w| display_date(w.start)),
            end_date: window.map(|w| display_date(w.end)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    league_id: Option<i64>,
    season_id: Option<i64>,
    code: String,
}

/// Cluster fixture stages into the series listed on the site.
///
/// Stages sharing league, season and format code form a candidate group. A
/// group whose code is a single-format competition emits one series per
/// stage. Otherwise a "regular" stage absorbs its "play off" stage, or failing
/// that the stage whose id directly follows it. Groups without a regular stage
/// emit one series per stage.
///
/// Groups come out in first-seen order, stages inside a group by ascending id.
/// Fixtures without a stage, league or season are ignored, as are stages
/// without an id. Null league or season ids group together like any other id.
pub fn group_series(fixtures: &[Fixture]) -> Vec<Series> {
    let mut windows: HashMap<i64, StageWindow> = HashMap::new();
    let mut group_order: Vec<GroupKey> = Vec::new();
    let mut groups: HashMap<GroupKey, BTreeMap<i64, StageSummary>> = HashMap::new();

    for fixture in fixtures {
        let (Some(stage), Some(league), Some(season)) =
            (&fixture.stage, &fixture.league, &fixture.season)
        else {
            continue;
        };
        let Some(stage_id) = stage.id else {
            continue;
        };

        if let Some(ts) = fixture.start_time() {
            windows
                .entry(stage_id)
                .and_modify(|w| w.widen(ts))
                .or_insert_with(|| StageWindow::at(ts));
        }

        let code = league.code.clone().unwrap_or_default();
        let key = GroupKey {
            league_id: league.id,
            season_id: season.id,
            code: code.clone(),
        };
        let stages = match groups.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                group_order.push(e.key().clone());
                e.insert(BTreeMap::new())
            }
        };
        stages.entry(stage_id).or_insert_with(|| StageSummary {
            id: stage_id,
            name: stage.name.clone(),
            league_id: league.id,
            league_name: league.name.clone(),
            season_id: season.id,
            season_name: season.name.clone(),
            code,
        });
    }

    let mut series = Vec::new();
    for key in &group_order {
        if let Some(stages) = groups.remove(key) {
            let stages: Vec<StageSummary> = stages.into_values().collect();
            series.extend(emit_group(&stages, &windows));
        }
    }
    series
}

fn emit_group(stages: &[StageSummary], windows: &HashMap<i64, StageWindow>) -> Vec<Series> {
    let standalone = || -> Vec<Series> {
        stages
            .iter()
            .map(|s| s.to_series(SeriesId::Single(s.id), windows.get(&s.id).copied()))
            .collect()
    };

    if stages.first().is_some_and(|s| is_ignored_format(&s.code)) {
        return standalone();
    }

    let Some(regular) = stages
        .iter()
        .rfind(|s| s.lowercase_name().contains(REGULAR_MARKER))
    else {
        return standalone();
    };
    let playoff = stages.iter().rfind(|s| {
        let name = s.lowercase_name();
        !name.contains(REGULAR_MARKER) && name.contains(PLAYOFF_MARKER)
    });

    let mut covered = vec![regular.id];
    match playoff {
        Some(p) => covered.push(p.id),
        None => {
            if let Some(next) = regular
                .id
                .checked_add(1)
                .filter(|next| stages.iter().any(|s| s.id == *next))
            {
                covered.push(next);
            }
        }
    }

    let window = covered
        .iter()
        .filter_map(|id| windows.get(id).copied())
        .reduce(StageWindow::union);
    vec![regular.to_series(SeriesId::from_stage_ids(covered), window)]
}
