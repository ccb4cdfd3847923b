use tracing::debug;

use super::super::error::QuadtreeError;
use super::super::point::Point;
use super::super::quadtree::Quadtree;

/// 插入操作相关算法
impl Quadtree {
    /// 插入一个点
    ///
    /// 节点未满时直接追加到本节点；已满时（必要时先分裂）递归插入到包含该点的子象限。
    ///
    /// # 错误
    /// 节点已满且没有任何子象限严格包含该点时返回 `RoutingFailure`，
    /// 这说明点在树的范围之外或恰好落在象限边界上。树中已有的点不受影响。
    pub fn insert(&mut self, point: Point) -> Result<(), QuadtreeError> {
        if !self.is_full() {
            self.points.push(point);
            return Ok(());
        }

        let bounds = *self.bounds();
        let capacity = self.capacity();
        let children = self
            .children
            .get_or_insert_with(|| Self::create_children(&bounds, capacity));

        match children
            .iter_mut()
            .find(|child| child.bounds().contains(&point))
        {
            Some(child) => child.insert(point),
            None => Err(QuadtreeError::RoutingFailure { point, bounds }),
        }
    }

    /// 批量插入，遇到第一个路由失败时中止并返回错误
    ///
    /// # 返回值
    /// 成功插入的点数
    pub fn insert_all<I>(&mut self, points: I) -> Result<usize, QuadtreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut inserted = 0;
        for point in points {
            self.insert(point)?;
            inserted += 1;
        }
        debug!("Bulk loaded {} points into {}", inserted, self.bounds());
        Ok(inserted)
    }
}
