use std::ops::Range;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::trace;

use super::error::WorkloadError;
use crate::quadtree::{BoundingRectangle, Point, Quadtree};

/// 重叠点统计参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapParams {
    /// 并发查询的批次数
    pub batches: usize,
    /// 每个点的搜索矩形半边长
    pub search_half_extent: f64,
    /// 距离小于该值的两点视为重叠
    pub overlap_distance: f64,
}

impl OverlapParams {
    /// 检查参数：批次数至少为1，搜索半边长和重叠距离必须是有限的非负数
    pub fn validate(&self) -> Result<(), WorkloadError> {
        if self.batches == 0 {
            return Err(WorkloadError::InvalidParams(
                "batch count must be at least 1".to_string(),
            ));
        }
        if !(self.search_half_extent.is_finite() && self.search_half_extent >= 0.0) {
            return Err(WorkloadError::InvalidParams(format!(
                "search half extent must be finite and non-negative, got {}",
                self.search_half_extent
            )));
        }
        if !(self.overlap_distance.is_finite() && self.overlap_distance >= 0.0) {
            return Err(WorkloadError::InvalidParams(format!(
                "overlap distance must be finite and non-negative, got {}",
                self.overlap_distance
            )));
        }
        Ok(())
    }
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            batches: 10,
            search_half_extent: 10.0,
            overlap_distance: 3.0,
        }
    }
}

/// 统计与 `point` 重叠的其他点
///
/// 用以 `point` 为中心的矩形查询候选点，再按欧氏距离过滤；与 `point` 相等的点不计入。
///
/// # Panics
/// `search_half_extent` 为负数或 NaN 时 panic，调用前先用 [`OverlapParams::validate`] 检查
pub fn count_point_overlaps(tree: &Quadtree, point: &Point, params: &OverlapParams) -> u64 {
    let range = BoundingRectangle::around(*point, params.search_half_extent);
    tree.query(&range)
        .iter()
        .filter(|other| *other != point && point.distance_to(other) < params.overlap_distance)
        .count() as u64
}

/// 把 `0..len` 切分为最多 `batches` 个连续区间
///
/// 区间长度向上取整，`len` 不能被整除时最后一个区间较短，不会丢弃任何下标。
pub fn batch_ranges(len: usize, batches: usize) -> Vec<Range<usize>> {
    if len == 0 || batches == 0 {
        return Vec::new();
    }
    let stride = len.div_ceil(batches);
    (0..len)
        .step_by(stride)
        .map(|start| start..(start + stride).min(len))
        .collect()
}

/// 在当前线程上统计所有点的重叠数
///
/// # Panics
/// 与 [`count_point_overlaps`] 相同，参数需先通过 [`OverlapParams::validate`]
pub fn count_overlaps_sequential(tree: &Quadtree, points: &[Point], params: &OverlapParams) -> u64 {
    points
        .iter()
        .map(|point| count_point_overlaps(tree, point, params))
        .sum()
}

/// 并发统计所有点的重叠数
///
/// 点集按批次切分，每个批次在独立的阻塞任务中查询，只读共享同一棵树。
/// 参数无效时直接返回 `InvalidParams`，不会启动任何任务。
/// 函数返回时不再有任务持有 `tree`。
pub async fn count_overlaps(
    tree: Arc<Quadtree>,
    points: Arc<Vec<Point>>,
    params: OverlapParams,
) -> Result<u64, WorkloadError> {
    params.validate()?;

    fan_out(points, params.batches, move |batch| {
        count_overlaps_sequential(&tree, batch, &params)
    })
    .await
}

/// 把点集切分为批次，在阻塞任务中对每个批次调用 `count_batch`，汇总各批次的计数
///
/// 所有任务结束后才汇总；有任务失败时仍会等待其余任务结束，然后返回第一个错误。
/// 返回时 `count_batch` 及其捕获的值已全部释放。
pub(crate) async fn fan_out<F>(
    points: Arc<Vec<Point>>,
    batches: usize,
    count_batch: F,
) -> Result<u64, WorkloadError>
where
    F: Fn(&[Point]) -> u64 + Send + Sync + 'static,
{
    let count_batch = Arc::new(count_batch);
    let mut workers = JoinSet::new();
    for (batch, range) in batch_ranges(points.len(), batches).into_iter().enumerate() {
        let count_batch = Arc::clone(&count_batch);
        let points = Arc::clone(&points);
        workers.spawn_blocking(move || {
            let count = count_batch(&points[range.clone()]);
            trace!("Batch {} ({:?}) found {} overlaps", batch, range, count);
            count
        });
    }
    drop(count_batch);

    let mut total = 0;
    let mut first_error = None;
    while let Some(result) = workers.join_next().await {
        match result {
            Ok(count) => total += count,
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(total),
    }
}
