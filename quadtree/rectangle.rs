use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::point::Point;
use super::quadrant::Quadrant;

/// 轴对齐矩形 - 用中心点和半宽/半高表示
///
/// 覆盖范围是 `[x - width, x + width] × [y - height, y + height]`，
/// 其中 `width`/`height` 是半边长而不是完整边长。
/// 半边长始终非负，只能通过构造函数（或本 crate 内部的象限计算）创建。
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "[center {}, half extents {} x {}]", center, width, height)]
pub struct BoundingRectangle {
    pub(crate) center: Point,
    pub(crate) width: f64,  // 半宽
    pub(crate) height: f64, // 半高
}

impl BoundingRectangle {
    /// 创建新的矩形
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self::from_center(Point::new(center_x, center_y), width, height)
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        assert!(width >= 0.0 && height >= 0.0, "Invalid rectangle half extents");
        BoundingRectangle {
            center,
            width,
            height,
        }
    }

    /// 以点为中心、四个方向等距扩展的正方形搜索范围
    pub fn around(center: Point, half_extent: f64) -> Self {
        Self::from_center(center, half_extent, half_extent)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// 半宽
    pub fn width(&self) -> f64 {
        self.width
    }

    /// 半高
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn x(&self) -> f64 {
        self.center.x
    }

    pub fn y(&self) -> f64 {
        self.center.y
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.width
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.center.y - self.height
    }

    pub fn bottom(&self) -> f64 {
        self.center.y + self.height
    }

    /// 判断点是否严格位于矩形内部，边界上的点不算包含
    pub fn contains(&self, point: &Point) -> bool {
        point.x > self.left()
            && point.x < self.right()
            && point.y > self.top()
            && point.y < self.bottom()
    }

    /// 判断两个矩形是否相交（分离轴测试，边界接触也算相交）
    pub fn intersects(&self, other: &BoundingRectangle) -> bool {
        !(other.left() > self.right()
            || other.right() < self.left()
            || other.top() > self.bottom()
            || other.bottom() < self.top())
    }

    /// 计算指定象限的子矩形：半宽半高各减半，中心向象限方向偏移
    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingRectangle {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let (sx, sy) = quadrant.offset_signs();

        BoundingRectangle {
            center: Point::new(
                self.center.x + sx * half_width,
                self.center.y + sy * half_height,
            ),
            width: half_width,
            height: half_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_edges() {
        let rect = BoundingRectangle::new(5.0, 5.0, 2.0, 3.0);
        assert_eq!(rect.left(), 3.0);
        assert_eq!(rect.right(), 7.0);
        assert_eq!(rect.top(), 2.0);
        assert_eq!(rect.bottom(), 8.0);
    }

    #[test]
    fn test_accessors() {
        let rect = BoundingRectangle::around(Point::new(1.0, -2.0), 4.0);
        assert_eq!(rect.center(), Point::new(1.0, -2.0));
        assert_eq!(rect.width(), 4.0);
        assert_eq!(rect.height(), 4.0);
        assert_eq!((rect.x(), rect.y()), (1.0, -2.0));
    }

    #[test]
    fn test_contains_excludes_boundary() {
        let rect = BoundingRectangle::new(5.0, 5.0, 2.0, 2.0);

        assert!(!rect.contains(&Point::new(3.0, 5.0)));
        assert!(rect.contains(&Point::new(3.001, 5.0)));
        assert!(rect.contains(&Point::new(5.0, 5.0)));

        // 四条边都不包含
        assert!(!rect.contains(&Point::new(7.0, 5.0)));
        assert!(!rect.contains(&Point::new(5.0, 3.0)));
        assert!(!rect.contains(&Point::new(5.0, 7.0)));
        assert!(!rect.contains(&Point::new(15.0, 15.0)));
    }

    #[test]
    fn test_zero_extent_contains_nothing() {
        let rect = BoundingRectangle::new(1.0, 1.0, 0.0, 0.0);
        assert!(!rect.contains(&Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_rectangle_intersects() {
        let a = BoundingRectangle::new(0.0, 0.0, 4.0, 4.0);
        let far = BoundingRectangle::new(10.0, 0.0, 4.0, 4.0);
        let near = BoundingRectangle::new(7.0, 0.0, 4.0, 4.0);

        assert!(!a.intersects(&far));
        assert!(!far.intersects(&a));
        assert!(a.intersects(&near));
        assert!(near.intersects(&a));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = BoundingRectangle::new(0.0, 0.0, 4.0, 4.0);
        let b = BoundingRectangle::new(8.0, 0.0, 4.0, 4.0);
        assert!(a.intersects(&b));

        let below = BoundingRectangle::new(0.0, 9.0, 4.0, 4.0);
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_nested_rectangles_intersect() {
        let outer = BoundingRectangle::new(0.0, 0.0, 10.0, 10.0);
        let inner = BoundingRectangle::new(1.0, 1.0, 1.0, 1.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let parent = BoundingRectangle::new(10.0, 10.0, 10.0, 10.0);

        assert_eq!(
            parent.quadrant(Quadrant::TopLeft),
            BoundingRectangle::new(5.0, 5.0, 5.0, 5.0)
        );
        assert_eq!(
            parent.quadrant(Quadrant::TopRight),
            BoundingRectangle::new(15.0, 5.0, 5.0, 5.0)
        );
        assert_eq!(
            parent.quadrant(Quadrant::BottomLeft),
            BoundingRectangle::new(5.0, 15.0, 5.0, 5.0)
        );
        assert_eq!(
            parent.quadrant(Quadrant::BottomRight),
            BoundingRectangle::new(15.0, 15.0, 5.0, 5.0)
        );
    }

    #[test]
    fn test_asymmetric_quadrant() {
        let parent = BoundingRectangle::new(0.0, 0.0, 8.0, 2.0);
        let q = parent.quadrant(Quadrant::BottomRight);
        assert_eq!(q, BoundingRectangle::new(4.0, 1.0, 4.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "Invalid rectangle half extents")]
    fn test_negative_extent_panics() {
        BoundingRectangle::new(0.0, 0.0, -1.0, 1.0);
    }
}
