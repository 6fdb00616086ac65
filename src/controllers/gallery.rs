use actix_web::{get, web, HttpResponse};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::image::Image;
use crate::models::ApiResponse;
use crate::services::explore::ExploreService;
use crate::services::store::ImageStore;
use crate::utils::error::AppResult;

// 原接口里 -1 代表"首次调用，不排除任何图片"
const NO_EXCLUSION: i64 = -1;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AlbumQuery {
    /// 相册ID
    pub album_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ImageQuery {
    /// 图片ID
    pub id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LikeWeightedQuery {
    /// 当前图片ID（会被点赞，且不参与本次抽样）
    pub id: i64,
    /// 偏爱图片ID，本次抽样中被选中的总概率被提升到约50%
    pub favourite_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SkipWeightedQuery {
    /// 当前图片ID（省略或 -1 表示首次调用，不排除）
    pub id: Option<i64>,
    /// 偏爱图片ID，本次抽样中被选中的总概率被提升到约50%
    pub favourite_id: i64,
}

fn ok_image(image: Image) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        code: 200,
        status: "ok".to_string(),
        message: None,
        data: Some(image),
    })
}

/// 列出库中全部图片
#[utoipa::path(
    get,
    path = "/api/print_images",
    responses(
        (status = 200, description = "图片列表", body = Vec<Image>)
    )
)]
#[get("/print_images")]
pub async fn print_images(store: web::Data<ImageStore>) -> AppResult<HttpResponse> {
    let images = store.list_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse {
        code: 200,
        status: "ok".to_string(),
        message: None,
        data: Some(images),
    }))
}

/// 相册中位置最靠前的图片
#[utoipa::path(
    get,
    path = "/api/get_first_image_in_album",
    params(AlbumQuery),
    responses(
        (status = 200, description = "相册第一张图片", body = Image),
        (status = 404, description = "相册不存在或为空")
    )
)]
#[get("/get_first_image_in_album")]
pub async fn get_first_image_in_album(
    query: web::Query<AlbumQuery>,
    explore: web::Data<ExploreService>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    log::info!("收到相册首图查询: album_id={}", query.album_id);

    let first_id = explore.first(query.album_id).await?;
    Ok(ok_image(store.get_by_id(first_id).await?))
}

/// 点赞当前图片并返回相册内的下一张（循环）
#[utoipa::path(
    get,
    path = "/api/like_image",
    params(ImageQuery),
    responses(
        (status = 200, description = "下一张图片", body = Image),
        (status = 404, description = "图片不存在")
    )
)]
#[get("/like_image")]
pub async fn like_image(
    query: web::Query<ImageQuery>,
    explore: web::Data<ExploreService>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    log::info!("收到点赞请求: id={}", query.id);

    // 先解析后继再点赞，后继取决于点赞前的状态
    let next_id = explore.next(query.id).await?;
    explore.like(query.id).await?;

    Ok(ok_image(store.get_by_id(next_id).await?))
}

/// 跳过当前图片，返回相册内的下一张（循环）
#[utoipa::path(
    get,
    path = "/api/skip_image",
    params(ImageQuery),
    responses(
        (status = 200, description = "下一张图片", body = Image),
        (status = 404, description = "图片不存在")
    )
)]
#[get("/skip_image")]
pub async fn skip_image(
    query: web::Query<ImageQuery>,
    explore: web::Data<ExploreService>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    let next_id = explore.next(query.id).await?;
    Ok(ok_image(store.get_by_id(next_id).await?))
}

/// 点赞当前图片并按点赞数加权随机返回下一张
#[utoipa::path(
    get,
    path = "/api/like_image_v2",
    params(LikeWeightedQuery),
    responses(
        (status = 200, description = "下一张图片", body = Image),
        (status = 404, description = "图片不存在"),
        (status = 422, description = "排除后没有候选图片")
    )
)]
#[get("/like_image_v2")]
pub async fn like_image_v2(
    query: web::Query<LikeWeightedQuery>,
    explore: web::Data<ExploreService>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    log::info!(
        "收到加权点赞请求: id={}, favourite_id={}",
        query.id,
        query.favourite_id
    );

    // 抽样读取的是点赞前的快照（与点赞顺序保持原有语义）
    let next_id = explore.pick_next(query.favourite_id, Some(query.id)).await?;
    explore.like(query.id).await?;

    Ok(ok_image(store.get_by_id(next_id).await?))
}

/// 跳过当前图片，按点赞数加权随机返回下一张
#[utoipa::path(
    get,
    path = "/api/skip_image_v2",
    params(SkipWeightedQuery),
    responses(
        (status = 200, description = "下一张图片", body = Image),
        (status = 422, description = "没有候选图片")
    )
)]
#[get("/skip_image_v2")]
pub async fn skip_image_v2(
    query: web::Query<SkipWeightedQuery>,
    explore: web::Data<ExploreService>,
    store: web::Data<ImageStore>,
) -> AppResult<HttpResponse> {
    let exclude = match query.id {
        None => None,
        Some(NO_EXCLUSION) => None,
        Some(id) => Some(id),
    };

    let next_id = explore.pick_next(query.favourite_id, exclude).await?;
    Ok(ok_image(store.get_by_id(next_id).await?))
}
