use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("找不到图片: {0}")]
    ImageNotFound(i64),

    #[error("相册 {0} 不存在或没有图片")]
    AlbumNotFound(i64),

    #[error("排除后没有可抽取的候选图片")]
    EmptyCandidateSet,

    #[error("无效的秘钥")]
    InvalidSecret,

    #[error("错误的请求: {0}")]
    BadRequest(String),

    #[error("VK API错误: {0}")]
    VkApiError(String),

    #[error("HTTP请求错误: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Serde JSON错误: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_type) = match self {
            AppError::ImageNotFound(_) => {
                (actix_web::http::StatusCode::NOT_FOUND, "image_not_found")
            }
            AppError::AlbumNotFound(_) => {
                (actix_web::http::StatusCode::NOT_FOUND, "album_not_found")
            }
            AppError::EmptyCandidateSet => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "empty_candidate_set",
            ),
            AppError::InvalidSecret => (actix_web::http::StatusCode::FORBIDDEN, "invalid_secret"),
            AppError::BadRequest(_) => (actix_web::http::StatusCode::BAD_REQUEST, "bad_request"),
            AppError::VkApiError(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "vk_api_error",
            ),
            AppError::ReqwestError(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "request_error",
            ),
            AppError::SerdeJsonError(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "serialization_error",
            ),
            AppError::DatabaseError(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
            ),
            AppError::ConfigError(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
            ),
        };

        HttpResponse::build(status_code).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        })
    }
}
