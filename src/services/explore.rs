use rand::Rng;

use crate::models::image::ImageWeight;
use crate::services::store::ImageStore;
use crate::utils::error::{AppError, AppResult};

// 选图引擎：两种互相独立的"下一张"策略 + 点赞
//
// 引擎本身无状态，所有状态都在 ImageStore 里；
// 每次调用都读取最新的点赞数。
#[derive(Clone)]
pub struct ExploreService {
    store: ImageStore,
}

impl ExploreService {
    pub fn new(store: ImageStore) -> Self {
        Self { store }
    }

    // 相册内 album_position 最小的图片
    pub async fn first(&self, album_id: i64) -> AppResult<i64> {
        self.store
            .first_in_album(album_id)
            .await?
            .ok_or(AppError::AlbumNotFound(album_id))
    }

    // 相册内的循环后继：取同相册中 album_position 严格更大的最小位置，
    // 已是最后一张时回绕到第一张。单张图片的相册后继是它自己。
    pub async fn next(&self, image_id: i64) -> AppResult<i64> {
        let image = self.store.get_by_id(image_id).await?;

        match self
            .store
            .next_in_album(image.album_id, image.album_position)
            .await?
        {
            Some(id) => Ok(id),
            None => self
                .store
                .first_in_album(image.album_id)
                .await?
                .ok_or(AppError::AlbumNotFound(image.album_id)),
        }
    }

    // 全库加权随机抽取下一张。
    //
    // exclude_id 通常是当前正在展示的图片（首次调用传 None）。
    // favourite_id 只是本次调用的参数，不落库；当 favourite 恰好等于
    // exclude_id 时它不参与候选，此时退化为普通的按点赞数加权抽样
    // （沿用原有行为：favourite 正在展示时失去概率加成）。
    pub async fn pick_next(&self, favourite_id: i64, exclude_id: Option<i64>) -> AppResult<i64> {
        let candidates = self.store.weight_snapshot(exclude_id).await?;

        let roll: u64 = rand::rng().random();
        weighted_pick(&candidates, favourite_id, roll).ok_or(AppError::EmptyCandidateSet)
    }

    // 点赞：自增 likes_count 并记录时间戳，原子地作用于单条记录
    pub async fn like(&self, image_id: i64) -> AppResult<()> {
        self.store.increment_likes(image_id).await
    }
}

// 带 favourite 加成的前缀和加权抽样。
//
// candidates 必须按ID升序（ID只作为累积和遍历的固定顺序，无语义）。
// 基础权重为 likes_count + 1，保证零赞图片也可能被抽中；
// favourite 的权重被改写为其余候选的权重之和，
// 使"favourite"与"其他所有图片"在顶层各占约50%，
// 其余概率在非 favourite 之间按点赞数比例分配。
// favourite 不在候选中时不做改写，退化为普通加权抽样。
pub(crate) fn weighted_pick(
    candidates: &[ImageWeight],
    favourite_id: i64,
    roll: u64,
) -> Option<i64> {
    if candidates.is_empty() {
        return None;
    }
    // 唯一候选直接返回（若它同时是 favourite，"其余之和"为零，无法归一化）
    if candidates.len() == 1 {
        return Some(candidates[0].id);
    }

    let base: Vec<u64> = candidates
        .iter()
        .map(|w| w.likes_count as u64 + 1)
        .collect();
    let base_total: u64 = base.iter().sum();

    let weights: Vec<u64> = candidates
        .iter()
        .zip(&base)
        .map(|(candidate, &w)| {
            if candidate.id == favourite_id {
                base_total - w
            } else {
                w
            }
        })
        .collect();
    let total: u64 = weights.iter().sum();

    let threshold = roll % total;
    let mut cumulative = 0u64;
    for (candidate, &w) in candidates.iter().zip(&weights) {
        cumulative += w;
        if cumulative > threshold {
            return Some(candidate.id);
        }
    }

    // threshold < total，循环必然命中
    unreachable!("cumulative weight walk exhausted below total")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image::NewImage;
    use sqlx::sqlite::SqlitePoolOptions;

    fn weight(id: i64, likes_count: i64) -> ImageWeight {
        ImageWeight { id, likes_count }
    }

    #[test]
    fn test_weighted_pick_empty_and_single() {
        assert_eq!(weighted_pick(&[], 1, 7), None);

        // 唯一候选总是被返回，不管 favourite 是谁
        for roll in 0..10 {
            assert_eq!(weighted_pick(&[weight(5, 0)], 5, roll), Some(5));
            assert_eq!(weighted_pick(&[weight(5, 0)], 99, roll), Some(5));
        }
    }

    #[test]
    fn test_weighted_pick_favourite_gets_half() {
        // 三张零赞图片，favourite=2：基础权重 1,1,1，
        // favourite 改写为其余之和 2，总权重 4
        let candidates = [weight(1, 0), weight(2, 0), weight(3, 0)];

        let mut counts = [0usize; 3];
        for roll in 0..4 {
            let picked = weighted_pick(&candidates, 2, roll).unwrap();
            counts[(picked - 1) as usize] += 1;
        }
        // 精确遍历整个余数空间：favourite 恰好占一半
        assert_eq!(counts, [1, 2, 1]);
    }

    #[test]
    fn test_weighted_pick_proportional_without_favourite() {
        // favourite 不在候选中：普通按 likes+1 加权
        let candidates = [weight(1, 0), weight(2, 3)];
        let mut counts = [0usize; 2];
        for roll in 0..5 {
            let picked = weighted_pick(&candidates, 777, roll).unwrap();
            counts[(picked - 1) as usize] += 1;
        }
        assert_eq!(counts, [1, 4]);
    }

    #[test]
    fn test_weighted_pick_reads_live_likes() {
        // 点赞数变化必须反映到下一次抽样的权重里
        let before = [weight(1, 0), weight(2, 0), weight(3, 0)];
        let after = [weight(1, 0), weight(2, 0), weight(3, 6)];

        // roll=3: before 总权重 3 -> 余数 0 -> 图1；after 总权重 9 -> 余数 3 -> 图3
        assert_eq!(weighted_pick(&before, 0, 3), Some(1));
        assert_eq!(weighted_pick(&after, 0, 3), Some(3));
    }

    async fn memory_service() -> ExploreService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        let store = ImageStore::new(pool);
        store.init_tables().await.expect("Failed to initialize tables");
        ExploreService::new(store)
    }

    async fn seed(service: &ExploreService, album_id: i64, positions: &[i64]) {
        for &pos in positions {
            service
                .store
                .insert(&NewImage {
                    album_id,
                    album_position: pos,
                    author_id: 1,
                    author_name: "作者".to_string(),
                    likes_count: 0,
                    url: format!("https://example.com/{album_id}/{pos}.jpg"),
                    path: format!("images/{album_id}/{pos}.jpg"),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_first_returns_min_position() {
        let service = memory_service().await;
        // 位置故意不连续、乱序入库
        seed(&service, 7, &[30, 10, 20]).await;

        let first = service.first(7).await.unwrap();
        assert_eq!(
            service.store.get_by_id(first).await.unwrap().album_position,
            10
        );
        // 幂等
        assert_eq!(service.first(7).await.unwrap(), first);

        match service.first(999).await {
            Err(AppError::AlbumNotFound(999)) => {}
            other => panic!("expected AlbumNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_next_walks_ring_and_wraps() {
        let service = memory_service().await;
        seed(&service, 1, &[0, 5, 9]).await;

        let a = service.first(1).await.unwrap();
        let b = service.next(a).await.unwrap();
        let c = service.next(b).await.unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        // 最后一张回绕到第一张
        assert_eq!(service.next(c).await.unwrap(), a);

        match service.next(12345).await {
            Err(AppError::ImageNotFound(12345)) => {}
            other => panic!("expected ImageNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_next_is_per_album_ring() {
        let service = memory_service().await;
        seed(&service, 1, &[0, 1]).await;
        seed(&service, 2, &[0]).await;

        let first_a = service.first(1).await.unwrap();
        let only_b = service.first(2).await.unwrap();

        // 单张图片相册：后继是自己
        assert_eq!(service.next(only_b).await.unwrap(), only_b);
        // 相册1的环不会串到相册2
        let second_a = service.next(first_a).await.unwrap();
        assert_ne!(second_a, only_b);
        assert_eq!(service.next(second_a).await.unwrap(), first_a);
    }

    #[tokio::test]
    async fn test_pick_next_never_returns_excluded() {
        let service = memory_service().await;
        seed(&service, 1, &[0, 1, 2]).await;

        for _ in 0..50 {
            let picked = service.pick_next(1, Some(2)).await.unwrap();
            assert_ne!(picked, 2);
        }
    }

    #[tokio::test]
    async fn test_pick_next_single_candidate_and_empty() {
        let service = memory_service().await;
        seed(&service, 1, &[0, 1]).await;

        // 排除后只剩一张：必然返回它，favourite 是谁无所谓
        for _ in 0..10 {
            assert_eq!(service.pick_next(2, Some(2)).await.unwrap(), 1);
        }

        let lonely = memory_service().await;
        seed(&lonely, 1, &[0]).await;
        assert_eq!(lonely.pick_next(1, None).await.unwrap(), 1);

        match lonely.pick_next(1, Some(1)).await {
            Err(AppError::EmptyCandidateSet) => {}
            other => panic!("expected EmptyCandidateSet, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_like_updates_exactly_one_record() {
        let service = memory_service().await;
        seed(&service, 1, &[0, 1]).await;

        service.like(1).await.unwrap();
        service.like(1).await.unwrap();

        assert_eq!(service.store.get_by_id(1).await.unwrap().likes_count, 2);
        assert_eq!(service.store.get_by_id(2).await.unwrap().likes_count, 0);
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let service = memory_service().await;
        seed(&service, 1, &[0]).await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let service = service.clone();
            handles.push(tokio::spawn(async move { service.like(1).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.store.get_by_id(1).await.unwrap().likes_count, 20);
    }
}
