use tracing::trace;

use super::super::error::QuadtreeError;
use super::super::quadrant::Quadrant;
use super::super::quadtree::Quadtree;
use super::super::rectangle::BoundingRectangle;

/// 节点分裂相关算法
impl Quadtree {
    /// 把节点分裂为四个空的子节点
    ///
    /// 子节点的半宽半高是父节点的一半，中心分别偏移到四个象限，容量与父节点相同。
    /// 对已分裂的节点调用会返回 `AlreadyDivided`，现有子节点保持不变。
    pub fn divide(&mut self) -> Result<(), QuadtreeError> {
        if self.is_split() {
            return Err(QuadtreeError::AlreadyDivided {
                bounds: *self.bounds(),
            });
        }
        self.children = Some(Self::create_children(self.bounds(), self.capacity()));
        Ok(())
    }

    /// 按 `Quadrant::ALL` 顺序创建四个子节点
    pub(crate) fn create_children(
        bounds: &BoundingRectangle,
        capacity: usize,
    ) -> Box<[Quadtree; 4]> {
        trace!("Dividing node {}", bounds);
        Box::new(
            Quadrant::ALL.map(|quadrant| Quadtree::with_bounds(bounds.quadrant(quadrant), capacity)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadtree::Point;

    #[test]
    fn test_divide_creates_four_quadrants() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 3);
        qt.divide().unwrap();

        assert!(qt.is_split());
        let children = qt.children().unwrap();
        let expected = [(5.0, 5.0), (15.0, 5.0), (5.0, 15.0), (15.0, 15.0)];
        for (child, (x, y)) in children.iter().zip(expected) {
            assert_eq!(*child.bounds(), BoundingRectangle::new(x, y, 5.0, 5.0));
            assert_eq!(child.capacity(), 3);
            assert!(child.is_empty());
            assert!(!child.is_split());
        }
    }

    #[test]
    fn test_interior_points_fall_into_exactly_one_child() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 1);
        qt.divide().unwrap();
        let children = qt.children().unwrap();

        // 网格步长避开 x=10 和 y=10 的公共边界
        for i in 0..40 {
            for j in 0..40 {
                let p = Point::new(0.25 + i as f64 * 0.5, 0.25 + j as f64 * 0.5);
                assert!(qt.bounds().contains(&p));
                let hits = children.iter().filter(|c| c.bounds().contains(&p)).count();
                assert_eq!(hits, 1, "point {} must fall into exactly one quadrant", p);
            }
        }

        // 公共边界上的点不属于任何子节点
        let on_edge = Point::new(10.0, 4.0);
        assert!(children.iter().all(|c| !c.bounds().contains(&on_edge)));
    }

    #[test]
    fn test_divide_twice_is_rejected() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 1);
        qt.insert(Point::new(1.0, 1.0)).unwrap();
        qt.insert(Point::new(2.0, 2.0)).unwrap();
        assert!(qt.is_split());

        let err = qt.divide().unwrap_err();
        assert_eq!(
            err,
            QuadtreeError::AlreadyDivided {
                bounds: BoundingRectangle::new(10.0, 10.0, 10.0, 10.0)
            }
        );

        // 已有的子节点没有被替换
        assert_eq!(qt.child(Quadrant::TopLeft).unwrap().points(), &[Point::new(2.0, 2.0)]);
        assert_eq!(qt.len(), 2);
    }
}
