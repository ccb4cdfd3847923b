use serde::{Deserialize, Serialize};

/// 节点分裂后的四个象限，顺序即子节点的存储与查询顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// 在子节点数组中的下标
    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// 子节点中心相对父节点中心的偏移方向 (x, y)
    ///
    /// y 轴向下增长，所以 "top" 对应 -y
    pub fn offset_signs(self) -> (f64, f64) {
        match self {
            Quadrant::TopLeft => (-1.0, -1.0),
            Quadrant::TopRight => (1.0, -1.0),
            Quadrant::BottomLeft => (-1.0, 1.0),
            Quadrant::BottomRight => (1.0, 1.0),
        }
    }
}
