use crate::state::app_settings::AppSettings;
use crate::state::player_cache::PlayerCache;
use cricket_api::client::CricketApi;

/// Shared by every request handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct App {
    pub api: CricketApi,
    pub players: PlayerCache,
}

impl App {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            api: CricketApi::with_config(settings.api.clone()),
            players: PlayerCache::new(settings.players_ttl),
        }
    }
}
