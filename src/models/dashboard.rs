use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::image::Image;

// 仪表盘数据: 点赞最多的 n 张 + 最近被点赞的 k 张
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub top: Vec<Image>,
    pub last: Vec<Image>,
}
