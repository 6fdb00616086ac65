use std::collections::HashMap;

use crate::config::CONFIG;
use crate::models::image::NewImage;
use crate::services::store::ImageStore;
use crate::services::vk::VkService;
use crate::utils::error::AppResult;

// 相册入库服务：从 VK 拉取相册元数据写进 ImageStore。
// 只记录元数据（链接、作者、初始点赞数），不下载图片文件。
#[derive(Clone)]
pub struct IngestService {
    store: ImageStore,
    vk: VkService,
}

#[derive(Debug, Clone, Copy, serde::Serialize, utoipa::ToSchema)]
pub struct IngestSummary {
    pub total: i64,
    pub inserted: i64,
    pub skipped: i64,
}

impl IngestService {
    pub fn new(store: ImageStore, vk: VkService) -> Self {
        Self { store, vk }
    }

    pub async fn ingest_album(&self, owner_id: i64, album_id: i64) -> AppResult<IngestSummary> {
        let batch_size = CONFIG.images_batch_size;
        // 同一作者只查询一次
        let mut author_names: HashMap<i64, String> = HashMap::new();

        let mut summary = IngestSummary {
            total: 0,
            inserted: 0,
            skipped: 0,
        };
        let mut position: i64 = 0;

        loop {
            let page = self
                .vk
                .get_photos(owner_id, album_id, position, batch_size)
                .await?;
            summary.total = page.count;

            if page.items.is_empty() {
                break;
            }

            for photo in &page.items {
                let author_name = match author_names.get(&photo.user_id) {
                    Some(name) => name.clone(),
                    None => {
                        let users = self.vk.get_users(&[photo.user_id]).await?;
                        let name = users
                            .first()
                            .map(|u| format!("{} {}", u.first_name, u.last_name))
                            .unwrap_or_else(|| format!("id{}", photo.user_id));
                        author_names.insert(photo.user_id, name.clone());
                        name
                    }
                };

                let image = NewImage {
                    album_id,
                    album_position: position,
                    author_id: photo.user_id,
                    author_name,
                    likes_count: photo.likes.count,
                    url: photo.largest_size_url().unwrap_or_default().to_string(),
                    path: format!("{}/{}/{}.jpg", CONFIG.images_path, album_id, photo.id),
                };

                if self.store.insert(&image).await? {
                    summary.inserted += 1;
                    log::info!(
                        "({}/{}) {} 获得 {} 个赞: {}",
                        position + 1,
                        summary.total,
                        image.author_name,
                        image.likes_count,
                        image.url
                    );
                } else {
                    summary.skipped += 1;
                    log::debug!("相册 {album_id} 位置 {position} 的图片已在库中");
                }
                position += 1;
            }

            if position >= page.count {
                break;
            }
        }

        Ok(summary)
    }
}
