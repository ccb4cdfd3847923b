use super::point::Point;
use super::rectangle::BoundingRectangle;

/// 四叉树操作错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadtreeError {
    /// 已满且已分裂的节点无法把点路由到任何子象限。
    /// 点在整棵树的范围之外，或恰好落在象限的公共边界上。
    #[error("cannot route point {point} into any quadrant of node {bounds}")]
    RoutingFailure {
        point: Point,
        bounds: BoundingRectangle,
    },

    /// 对已经分裂的节点再次调用 divide
    #[error("node {bounds} is already divided")]
    AlreadyDivided { bounds: BoundingRectangle },

    #[error("capacity must be at least 1")]
    InvalidCapacity,

    #[error("half extents must be non-negative, got width {width} and height {height}")]
    InvalidBounds { width: f64, height: f64 },
}

impl QuadtreeError {
    /// 是否为路由失败（调用方需要中止本次批量加载）
    pub fn is_routing_failure(&self) -> bool {
        matches!(self, QuadtreeError::RoutingFailure { .. })
    }
}
