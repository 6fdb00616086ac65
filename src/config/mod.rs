use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub vk_api_base_url: String,
    pub vk_access_token: String,
    pub images_path: String,
    pub images_batch_size: i64,
    pub dashboard_secret: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .unwrap_or(4000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:db.db".to_string()),
            vk_api_base_url: env::var("VK_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.vk.com/method".to_string()),
            vk_access_token: env::var("ACCESS_TOKEN").unwrap_or_default(),
            images_path: env::var("IMAGES_PATH").unwrap_or_else(|_| "images".to_string()),
            images_batch_size: env::var("IMAGES_BATCH_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
            dashboard_secret: env::var("SECRET").unwrap_or_else(|_| "secret".to_string()),
        }
    }
}

lazy_static! {
    // 全局配置，启动时从环境变量读取一次
    pub static ref CONFIG: Arc<AppConfig> = Arc::new(AppConfig::default());
}
