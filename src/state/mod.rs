pub mod app_settings;
pub mod player_cache;
