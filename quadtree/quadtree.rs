use serde::{Deserialize, Serialize};

use super::error::QuadtreeError;
use super::point::Point;
use super::quadrant::Quadrant;
use super::rectangle::BoundingRectangle;

/// 用于JSON序列化的树结构
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeVisualization {
    /// 节点容量（整棵树相同）
    pub capacity: usize,
    /// 树中点的总数
    pub len: usize,
    /// 树的深度
    pub depth: usize,
    pub root: NodeVisualization,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeVisualization {
    pub bounds: BoundingRectangle,
    /// 节点层级（根节点为0）
    pub level: usize,
    /// 直接存储在该节点上的点
    pub points: Vec<Point>,
    /// 子节点，按 TL, TR, BL, BR 顺序；叶子节点为空
    pub children: Vec<NodeVisualization>,
}

/// 点四叉树节点
///
/// 每个节点最多直接存储 `capacity` 个点，溢出时一次性分裂出四个子节点，
/// 之后的点被路由到包含它的子象限。子节点由父节点独占，没有反向引用。
#[derive(Debug, Clone)]
pub struct Quadtree {
    /// 节点覆盖的区域，构造后不再改变
    bounds: BoundingRectangle,
    /// 直接存储在本节点的点，保持插入顺序
    pub(crate) points: Vec<Point>,
    /// 分裂后的四个子节点，按 `Quadrant::ALL` 顺序存放；`None` 表示叶子节点
    pub(crate) children: Option<Box<[Quadtree; 4]>>,
    capacity: usize,
}

impl Quadtree {
    /// 创建空的四叉树根节点
    ///
    /// # Panics
    /// `capacity` 为 0 或半宽/半高为负数时 panic，需要错误返回时使用 [`Quadtree::try_new`]
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64, capacity: usize) -> Self {
        Self::with_bounds(
            BoundingRectangle::new(center_x, center_y, width, height),
            capacity,
        )
    }

    /// 不会 panic 的构造函数
    pub fn try_new(
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        capacity: usize,
    ) -> Result<Self, QuadtreeError> {
        if capacity == 0 {
            return Err(QuadtreeError::InvalidCapacity);
        }
        // NaN 也会被拒绝
        if !(width >= 0.0 && height >= 0.0) {
            return Err(QuadtreeError::InvalidBounds { width, height });
        }
        Ok(Self::with_bounds(
            BoundingRectangle::new(center_x, center_y, width, height),
            capacity,
        ))
    }

    pub fn with_bounds(bounds: BoundingRectangle, capacity: usize) -> Self {
        assert!(capacity >= 1, "Capacity must be at least 1");
        Quadtree {
            bounds,
            points: Vec::with_capacity(capacity),
            children: None,
            capacity,
        }
    }

    pub fn bounds(&self) -> &BoundingRectangle {
        &self.bounds
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 直接存储在本节点的点（不含子树）
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// 节点是否已经分裂
    pub fn is_split(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> Option<&[Quadtree; 4]> {
        self.children.as_deref()
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&Quadtree> {
        self.children().map(|children| &children[quadrant.index()])
    }

    /// 节点是否已满，下一个点需要路由到子节点
    pub(crate) fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    /// 子树中点的总数
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(Quadtree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self
                .children()
                .map_or(true, |children| children.iter().all(Quadtree::is_empty))
    }

    /// 树的深度，未分裂的节点深度为1
    pub fn depth(&self) -> usize {
        1 + self.children().map_or(0, |children| {
            children.iter().map(Quadtree::depth).max().unwrap_or(0)
        })
    }

    /// 子树中节点的总数（含自身）
    pub fn node_count(&self) -> usize {
        1 + self.children().map_or(0, |children| {
            children.iter().map(Quadtree::node_count).sum()
        })
    }

    /// 导出树结构为JSON格式，用于可视化和调试
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.create_tree_visualization())
    }

    pub fn create_tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            capacity: self.capacity,
            len: self.len(),
            depth: self.depth(),
            root: self.create_node_visualization(0),
        }
    }

    /// 递归创建节点的可视化结构
    fn create_node_visualization(&self, level: usize) -> NodeVisualization {
        NodeVisualization {
            bounds: self.bounds,
            level,
            points: self.points.clone(),
            children: self.children().map_or_else(Vec::new, |children| {
                children
                    .iter()
                    .map(|child| child.create_node_visualization(level + 1))
                    .collect()
            }),
        }
    }
}
