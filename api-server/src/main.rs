mod config;
mod error;
mod handlers;
mod leaderboard;
mod store;
mod types;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};

use crate::config::{AppState, PageLimits, ResumeConfig, ServerConfig};
use crate::handlers::{
    download_resume, health, json_error_handler, list_scores, query_error_handler, submit_score,
};
use crate::store::LeaderboardStore;

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/api/leaderboard", web::get().to(list_scores))
        .route("/api/leaderboard", web::post().to(submit_score))
        .route("/api/resume", web::get().to(download_resume));
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600);
    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let server = ServerConfig::from_env();
    let pages = PageLimits::from_env();
    let resume = ResumeConfig::from_env();

    let store = LeaderboardStore::open(&server.data_dir).map_err(|e| {
        tracing::error!("failed to open leaderboard store: {e}");
        std::io::Error::other(e)
    })?;
    let total_scores = store.count().map_err(std::io::Error::other)?;

    tracing::info!(
        "starting galaga leaderboard api: bind_addr={} data_dir={} scores={} page_size={} max_page_size={} json_limit_bytes={} resume={}",
        server.bind_addr,
        server.data_dir.display(),
        total_scores,
        pages.default_size,
        pages.max_size,
        server.json_limit_bytes,
        resume.path.display()
    );

    let state = AppState {
        store: Arc::new(store),
        pages,
        resume,
    };
    let json_limit = server.json_limit_bytes;
    let cors_origin = server.cors_allowed_origin.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config(json_limit))
            .app_data(query_config())
            .wrap(cors(cors_origin.as_deref()))
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(&server.bind_addr)?
    .run()
    .await
}
