use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::ApiResponse;
use crate::services::ingest::{IngestService, IngestSummary};
use crate::utils::error::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DownloadQuery {
    /// 相册所有者ID
    pub owner_id: i64,
    /// 相册ID
    pub album_id: i64,
}

/// 从 VK 相册拉取图片元数据入库
#[utoipa::path(
    get,
    path = "/api/download_images",
    params(DownloadQuery),
    responses(
        (status = 200, description = "入库结果", body = IngestSummary),
        (status = 500, description = "VK API 不可用")
    )
)]
#[get("/download_images")]
pub async fn download_images(
    query: web::Query<DownloadQuery>,
    ingest: web::Data<IngestService>,
) -> AppResult<HttpResponse> {
    log::info!(
        "收到相册入库请求: owner_id={}, album_id={}",
        query.owner_id,
        query.album_id
    );

    let summary = ingest.ingest_album(query.owner_id, query.album_id).await?;
    log::info!(
        "相册 {} 入库完成: 共 {} 张，新增 {}，跳过 {}",
        query.album_id,
        summary.total,
        summary.inserted,
        summary.skipped
    );

    Ok(HttpResponse::Ok().json(ApiResponse {
        code: 200,
        status: "ok".to_string(),
        message: None,
        data: Some(summary),
    }))
}
