use reqwest::Client;
use serde::Deserialize;

use crate::config::CONFIG;
use crate::utils::error::{AppError, AppResult};

const VK_API_VERSION: &str = "5.131";

// VK API 客户端（photos.get / users.get）
#[derive(Clone)]
pub struct VkService {
    client: Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkPhotoSize {
    pub width: i64,
    pub height: i64,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkLikes {
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkPhoto {
    pub id: i64,
    pub user_id: i64,
    pub likes: VkLikes,
    pub sizes: Vec<VkPhotoSize>,
}

impl VkPhoto {
    // 面积最大的尺寸的链接
    pub fn largest_size_url(&self) -> Option<&str> {
        self.sizes
            .iter()
            .max_by_key(|s| s.width * s.height)
            .map(|s| s.url.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkPhotosPage {
    pub count: i64,
    pub items: Vec<VkPhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
struct VkResponse<T> {
    response: Option<T>,
    error: Option<VkError>,
}

#[derive(Deserialize)]
struct VkError {
    error_code: i64,
    error_msg: String,
}

impl VkService {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: CONFIG.vk_api_base_url.clone(),
            access_token: CONFIG.vk_access_token.clone(),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let mut query: Vec<(&str, String)> = vec![
            ("access_token", self.access_token.clone()),
            ("v", VK_API_VERSION.to_string()),
        ];
        query.extend_from_slice(params);

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, method))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::VkApiError(format!(
                "{} 返回 HTTP {}",
                method,
                response.status()
            )));
        }

        let body: VkResponse<T> = response.json().await?;
        if let Some(error) = body.error {
            return Err(AppError::VkApiError(format!(
                "{} 失败: [{}] {}",
                method, error.error_code, error.error_msg
            )));
        }
        body.response
            .ok_or_else(|| AppError::VkApiError(format!("{method} 返回了空 response")))
    }

    // 分页读取相册照片
    pub async fn get_photos(
        &self,
        owner_id: i64,
        album_id: i64,
        offset: i64,
        count: i64,
    ) -> AppResult<VkPhotosPage> {
        self.call(
            "photos.get",
            &[
                ("owner_id", owner_id.to_string()),
                ("album_id", album_id.to_string()),
                ("extended", "1".to_string()),
                ("photo_sizes", "1".to_string()),
                ("offset", offset.to_string()),
                ("count", count.to_string()),
            ],
        )
        .await
    }

    // 批量查询用户资料（用于展示作者名）
    pub async fn get_users(&self, user_ids: &[i64]) -> AppResult<Vec<VkUser>> {
        let ids = user_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.call("users.get", &[("user_ids", ids)]).await
    }
}

impl Default for VkService {
    fn default() -> Self {
        Self::new()
    }
}
