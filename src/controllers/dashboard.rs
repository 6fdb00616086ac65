use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::CONFIG;
use crate::models::dashboard::DashboardResponse;
use crate::models::ApiResponse;
use crate::services::store::ImageStore;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// 点赞排行条目数
    pub n: Option<i64>,
    /// 最近点赞条目数
    pub k: Option<i64>,
    /// 访问秘钥
    pub secret: String,
}

/// 图片仪表盘：点赞最多的 n 张 + 最近被点赞的 k 张
#[utoipa::path(
    get,
    path = "/api/print_dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "仪表盘数据", body = DashboardResponse),
        (status = 403, description = "秘钥错误")
    )
)]
#[get("/print_dashboard")]
pub async fn print_dashboard(
    query: web::Query<DashboardQuery>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    // Yes, yes, not safe
    if query.secret != CONFIG.dashboard_secret {
        return Err(AppError::InvalidSecret);
    }

    let n = query.n.unwrap_or(5);
    let k = query.k.unwrap_or(5);

    let dashboard = DashboardResponse {
        top: store.top_liked(n).await?,
        last: store.recently_liked(k).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse {
        code: 200,
        status: "ok".to_string(),
        message: None,
        data: Some(dashboard),
    }))
}
