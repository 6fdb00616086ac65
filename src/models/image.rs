use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// 图片记录，对应 images 表的一行
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Image {
    pub id: i64,
    pub album_id: i64,
    pub album_position: i64,
    pub author_id: i64,
    pub author_name: String,
    pub likes_count: i64,
    #[schema(value_type = Option<String>)]
    pub last_update: Option<DateTime<Utc>>,
    pub url: String,
    pub path: String,
}

// 待入库的图片（id 由数据库分配）
#[derive(Debug, Clone)]
pub struct NewImage {
    pub album_id: i64,
    pub album_position: i64,
    pub author_id: i64,
    pub author_name: String,
    pub likes_count: i64,
    pub url: String,
    pub path: String,
}

// 加权抽样用的快照行: (id, likes_count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct ImageWeight {
    pub id: i64,
    pub likes_count: i64,
}
