use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::image::{Image, ImageWeight, NewImage};
use crate::utils::error::{AppError, AppResult};

// 图片存储服务，封装对 images 表的所有访问
//
// 选图引擎 (ExploreService) 只通过这里读写数据库，
// 测试时可以用内存数据库替换连接池。
#[derive(Clone)]
pub struct ImageStore {
    pool: SqlitePool,
}

impl ImageStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // 建表（幂等，启动时调用）
    pub async fn init_tables(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                album_id INTEGER NOT NULL,
                album_position INTEGER NOT NULL,
                author_id INTEGER NOT NULL,
                author_name TEXT NOT NULL,
                likes_count INTEGER NOT NULL DEFAULT 0,
                last_update DATETIME,
                url TEXT NOT NULL,
                path TEXT NOT NULL,
                UNIQUE(album_id, album_position)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("初始化 images 表时出错: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_images_album ON images(album_id, album_position)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("创建相册索引时出错: {e}")))?;

        Ok(())
    }

    // 按ID查找图片
    pub async fn get_by_id(&self, id: i64) -> AppResult<Image> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("按ID查询图片时出错: {e}")))?
            .ok_or(AppError::ImageNotFound(id))
    }

    // 相册内 album_position 最小的图片ID
    pub async fn first_in_album(&self, album_id: i64) -> AppResult<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM images WHERE album_id = ? ORDER BY album_position LIMIT 1",
        )
        .bind(album_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("查询相册首张图片时出错: {e}")))?;

        Ok(row.map(|(id,)| id))
    }

    // 相册内严格大于 position 的最小位置的图片ID（没有则返回 None，由调用方回绕）
    pub async fn next_in_album(&self, album_id: i64, position: i64) -> AppResult<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT id FROM images
            WHERE album_id = ? AND album_position > ?
            ORDER BY album_position LIMIT 1
            "#,
        )
        .bind(album_id)
        .bind(position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("查询相册后继图片时出错: {e}")))?;

        Ok(row.map(|(id,)| id))
    }

    // 加权抽样快照：全库 (id, likes_count)，按ID升序，可排除一张
    pub async fn weight_snapshot(&self, exclude_id: Option<i64>) -> AppResult<Vec<ImageWeight>> {
        let rows = match exclude_id {
            Some(exclude) => {
                sqlx::query_as::<_, ImageWeight>(
                    "SELECT id, likes_count FROM images WHERE id <> ? ORDER BY id",
                )
                .bind(exclude)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ImageWeight>("SELECT id, likes_count FROM images ORDER BY id")
                    .fetch_all(&self.pool)
                    .await
            }
        };

        rows.map_err(|e| AppError::DatabaseError(format!("查询点赞快照时出错: {e}")))
    }

    // 点赞：单条 UPDATE 原子完成 likes_count 自增与时间戳更新，
    // 并发点赞同一张图片不会丢失计数
    pub async fn increment_likes(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE images SET likes_count = likes_count + 1, last_update = ? WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("更新点赞数时出错: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::ImageNotFound(id));
        }
        Ok(())
    }

    // 全部图片（入库顺序）
    pub async fn list_all(&self) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("查询图片列表时出错: {e}")))
    }

    // 点赞最多的 n 张
    pub async fn top_liked(&self, n: i64) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images ORDER BY likes_count DESC LIMIT ?")
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("查询点赞排行时出错: {e}")))
    }

    // 最近被点赞的 k 张（从未被点赞的不计入）
    pub async fn recently_liked(&self, k: i64) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            r#"
            SELECT * FROM images
            WHERE last_update IS NOT NULL
            ORDER BY last_update DESC LIMIT ?
            "#,
        )
        .bind(k)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("查询最近点赞时出错: {e}")))
    }

    // 入库一张图片；(album_id, album_position) 已存在时忽略，返回是否真正插入
    pub async fn insert(&self, image: &NewImage) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO images
                (album_id, album_position, author_id, author_name, likes_count, url, path)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(image.album_id)
        .bind(image.album_position)
        .bind(image.author_id)
        .bind(&image.author_name)
        .bind(image.likes_count)
        .bind(&image.url)
        .bind(&image.path)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("图片入库时出错: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}
