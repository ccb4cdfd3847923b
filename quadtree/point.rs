use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 二维坐标点，按值复制
#[derive(Debug, Display, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[display(fmt = "({}, {})", x, y)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// 两点之间的欧氏距离
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}
