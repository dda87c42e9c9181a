mod app;
mod routes;
mod state;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use log::info;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = AppSettings::load();
    let app = App::new(&settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server running on http://localhost:{}", settings.port);

    axum::serve(listener, routes::router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cricket-site {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cricket-site - backend for the cricket information website

Usage:
  cricket-site
  cricket-site --help
  cricket-site --version

Environment:
  PORT                        Listen port (default 3001)
  SPORTMONKS_API_KEY          Sportmonks cricket API token
  GNEWS_API_KEY               GNews API key
  CRICKET_SPORTMONKS_URL      Override the Sportmonks base URL
  CRICKET_GNEWS_URL           Override the GNews base URL
  CRICKET_ASSETS_URL          Override the static asset feed base URL
  CRICKET_HTTP_TIMEOUT_SECS   Upstream request timeout (default 10)
  RUST_LOG                    Log filter (default info)"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
