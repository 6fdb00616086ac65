use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

mod config;
mod controllers;
mod models;
mod routes;
mod services;
mod utils;

use config::CONFIG;
use services::{ExploreService, ImageStore, IngestService, VkService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载.env文件
    dotenv().ok();

    // 初始化日志
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // --- 数据库初始化 ---
    log::info!("Connecting to database: {}", CONFIG.database_url);

    let connect_options = SqliteConnectOptions::from_str(&CONFIG.database_url)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?
        .create_if_missing(true);

    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to create connection pool: {e}")))?;

    let store = ImageStore::new(pool);
    store
        .init_tables()
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialize database: {e}")))?;
    log::info!("Database initialized successfully");
    // --- 数据库初始化结束 ---

    log::info!("Starting server at http://{}:{}", CONFIG.host, CONFIG.port);

    HttpServer::new(move || {
        // 配置CORS
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let vk_service = VkService::new();
        let store_data = web::Data::new(store.clone());
        let explore_service = web::Data::new(ExploreService::new(store.clone()));
        let ingest_service = web::Data::new(IngestService::new(store.clone(), vk_service));

        App::new()
            .app_data(store_data)
            .app_data(explore_service)
            .app_data(ingest_service)
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .configure(routes::configure)
    })
    .bind((CONFIG.host.clone(), CONFIG.port))?
    .run()
    .await
}
