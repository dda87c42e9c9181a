mod feeds;
mod reference;
mod series;
mod teams;

use crate::app::App;
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use cricket_api::client::ApiResult;
use log::error;
use serde::Serialize;
use serde_json::json;

pub fn router(app: App) -> Router {
    Router::new()
        // Static feeds and news
        .route("/api/default-player-images", get(feeds::default_player_images))
        .route("/api/default-images", get(feeds::default_images))
        .route("/api/news", get(feeds::news))
        .route("/api/players", get(feeds::players))
        // Fixtures and series
        .route("/api/schedule", get(series::schedule))
        .route("/api/match/{id}", get(reference::match_detail))
        .route("/api/series", get(series::list))
        .route("/api/series/{id}/matches", get(series::matches))
        .route("/api/series/{id}/standings", get(series::standings))
        .route("/api/series/{id}/squads", get(series::squads))
        // Teams
        .route("/api/teams", get(teams::list))
        .route("/api/teams/{id}", get(teams::detail))
        .route("/api/teams/{id}/matches", get(teams::matches))
        .route("/api/teams/{id}/live-matches", get(teams::live_matches))
        .route("/api/teams/{id}/series", get(teams::series))
        .route("/api/teams/{id}/squad/{season_id}", get(teams::season_squad))
        .route("/api/team-squads/{id}", get(teams::squads))
        .route("/api/team-rankings", get(reference::team_rankings))
        // Reference data
        .route("/api/venues", get(reference::venues))
        .route("/api/venues/{id}", get(reference::venue))
        .route("/api/stages/{id}", get(reference::stage))
        .route("/api/countries", get(reference::countries))
        .route("/api/countries/{id}", get(reference::country))
        .route("/api/player/{id}", get(reference::player))
        .route("/api/player-names/{id}", get(reference::player_name))
        .with_state(app)
}

/// `{"data": ...}`, the envelope most routes answer with.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

pub fn data<T: Serialize>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}

/// A failed route, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct RouteError {
    status: StatusCode,
    message: String,
}

impl RouteError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type RouteResult<T> = Result<T, RouteError>;

/// Turn upstream failures into a logged HTTP 500.
pub trait OrFail<T> {
    /// Answer with a fixed message; the cause only goes to the log.
    fn or_fail(self, message: &str) -> RouteResult<T>;
    /// Answer with the (credential-free) cause itself.
    fn or_report(self, context: &str) -> RouteResult<T>;
}

impl<T> OrFail<T> for ApiResult<T> {
    fn or_fail(self, message: &str) -> RouteResult<T> {
        self.map_err(|e| {
            error!("{message}: {e}");
            RouteError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: message.to_owned(),
            }
        })
    }

    fn or_report(self, context: &str) -> RouteResult<T> {
        self.map_err(|e| {
            error!("{context}: {e}");
            RouteError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use cricket_api::client::ApiConfig;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::Value;
    use std::time::Duration;

    /// Serve the router on an ephemeral port against a mock upstream.
    async fn spawn_site(upstream: &ServerGuard) -> String {
        let settings = AppSettings {
            port: 0,
            api: ApiConfig {
                sportmonks_url: upstream.url(),
                sportmonks_token: "tok".into(),
                gnews_url: upstream.url(),
                gnews_key: "key".into(),
                assets_url: format!("{}/", upstream.url()),
                timeout: Duration::from_secs(5),
            },
            players_ttl: Duration::from_secs(3600),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(App::new(&settings))).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn get_json(url: String) -> (StatusCode, Value) {
        let res = reqwest::get(url).await.unwrap();
        let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
        (status, res.json().await.unwrap())
    }

    #[tokio::test]
    async fn series_route_wraps_grouped_series() {
        let mut upstream = Server::new_async().await;
        upstream
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"data": [{
                    "id": 1,
                    "starting_at": "2026-02-01T00:00:00.000000Z",
                    "stage": {"id": 5, "name": "Final", "type": "knockout"},
                    "league": {"id": 1, "name": "T20 Blast", "code": "T20"},
                    "season": {"id": 100, "name": "2026"},
                }]})
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        let (status, body) = get_json(format!("{site}/api/series")).await;
        assert_eq!(status, StatusCode::OK);
        // Both windows answered with the same fixture; it still yields one series.
        let series = body["data"].as_array().unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0]["id"], 5);
        assert_eq!(series[0]["code"], "T20");
        assert_eq!(series[0]["start_date"], "1 February 2026");
    }

    #[tokio::test]
    async fn upstream_failure_is_a_500_with_error_body() {
        let mut upstream = Server::new_async().await;
        upstream
            .mock("GET", "/teams/3")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        let (status, body) = get_json(format!("{site}/api/teams/3")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Team not found");
    }

    #[tokio::test]
    async fn series_matches_accepts_comma_separated_ids() {
        let mut upstream = Server::new_async().await;
        for stage in ["10", "11"] {
            upstream
                .mock("GET", "/fixtures")
                .match_query(Matcher::UrlEncoded("filter[stage_id]".into(), stage.into()))
                .with_header("content-type", "application/json")
                .with_body(json!({"data": [{"id": stage.parse::<i64>().unwrap()}]}).to_string())
                .expect(1)
                .create_async()
                .await;
        }
        let site = spawn_site(&upstream).await;

        let (status, body) = get_json(format!("{site}/api/series/10,%2011/matches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 2);

        let (status, body) = get_json(format!("{site}/api/series/10,abc/matches")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("abc"));
    }

    #[tokio::test]
    async fn players_are_served_from_cache() {
        let mut upstream = Server::new_async().await;
        let feed = upstream
            .mock("GET", "/players.json")
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id": 1, "fullname": "Virat Kohli"}]"#)
            .expect(1)
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        for _ in 0..2 {
            let (status, body) = get_json(format!("{site}/api/players")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["data"][0]["fullname"], "Virat Kohli");
        }
        feed.assert_async().await;
    }

    #[tokio::test]
    async fn default_images_are_plain_text() {
        let mut upstream = Server::new_async().await;
        upstream
            .mock("GET", "/live_cricket_website_default_image_urls")
            .with_body("team=https://img/team.png")
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        let res = reqwest::get(format!("{site}/api/default-images")).await.unwrap();
        assert!(res.status().is_success());
        let content_type = res.headers()["content-type"].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(res.text().await.unwrap(), "team=https://img/team.png");
    }

    #[tokio::test]
    async fn bad_news_query_is_a_json_400() {
        let mut upstream = Server::new_async().await;
        let search = upstream
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        let (status, body) = get_json(format!("{site}/api/news?q=ashes&max=ten")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
        search.assert_async().await;
    }

    #[tokio::test]
    async fn stage_route_wraps_upstream_body() {
        let mut upstream = Server::new_async().await;
        upstream
            .mock("GET", "/stages/77")
            .match_query(Matcher::UrlEncoded("api_token".into(), "tok".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": 77, "name": "Regular Season"}}"#)
            .create_async()
            .await;
        let site = spawn_site(&upstream).await;

        let (status, body) = get_json(format!("{site}/api/stages/77")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["data"]["name"], "Regular Season");
    }
}
