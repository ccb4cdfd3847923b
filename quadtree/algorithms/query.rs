use super::super::point::Point;
use super::super::quadtree::Quadtree;
use super::super::rectangle::BoundingRectangle;

/// 查询操作相关算法
impl Quadtree {
    /// 返回子树中被查询矩形严格包含的所有点
    ///
    /// 与查询矩形不相交的节点整棵子树被剪枝；相交节点上的每个点再用 `contains` 单独过滤。
    /// 结果顺序：本节点的点在前，随后依次是左上、右上、左下、右下子树。
    ///
    /// # Example
    ///
    /// ```
    /// use quadspace::{BoundingRectangle, Point, Quadtree};
    ///
    /// let mut qt = Quadtree::new(100.0, 100.0, 100.0, 100.0, 4);
    /// qt.insert(Point::new(10.0, 10.0)).unwrap();
    /// qt.insert(Point::new(150.0, 150.0)).unwrap();
    ///
    /// let found = qt.query(&BoundingRectangle::new(10.0, 10.0, 5.0, 5.0));
    /// assert_eq!(found, vec![Point::new(10.0, 10.0)]);
    /// ```
    pub fn query(&self, range: &BoundingRectangle) -> Vec<Point> {
        let mut found = Vec::new();
        self.visit_in(range, &mut |point: &Point| found.push(*point));
        found
    }

    /// 统计查询矩形内的点数，不分配结果集合
    pub fn count_in(&self, range: &BoundingRectangle) -> usize {
        let mut count = 0;
        self.visit_in(range, &mut |_: &Point| count += 1);
        count
    }

    /// 按 `query` 的顺序访问查询矩形内的每个点
    pub fn visit_in<F>(&self, range: &BoundingRectangle, visitor: &mut F)
    where
        F: FnMut(&Point),
    {
        // 剪枝：节点区域与查询矩形不相交
        if !self.bounds().intersects(range) {
            return;
        }

        for point in &self.points {
            if range.contains(point) {
                visitor(point);
            }
        }

        if let Some(children) = self.children() {
            for child in children.iter() {
                child.visit_in(range, visitor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted(mut points: Vec<Point>) -> Vec<Point> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    fn random_points(count: usize, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| Point::new(rng.gen::<f64>() * 200.0, rng.gen::<f64>() * 200.0))
            .collect()
    }

    #[test]
    fn test_query_empty_tree() {
        let qt = Quadtree::new(100.0, 100.0, 100.0, 100.0, 4);
        assert!(qt.query(&BoundingRectangle::new(100.0, 100.0, 100.0, 100.0)).is_empty());
        assert!(qt.query(&BoundingRectangle::new(0.0, 0.0, 1000.0, 1000.0)).is_empty());
        assert!(qt.query(&BoundingRectangle::new(-50.0, 3.0, 0.0, 0.0)).is_empty());
        assert_eq!(qt.count_in(&BoundingRectangle::new(100.0, 100.0, 50.0, 50.0)), 0);
    }

    #[test]
    fn test_query_matches_brute_force() {
        let points = random_points(2_000, 42);
        let mut qt = Quadtree::new(100.0, 100.0, 100.0, 100.0, 4);
        qt.insert_all(points.iter().copied()).unwrap();
        assert!(qt.is_split());

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let range = BoundingRectangle::new(
                rng.gen::<f64>() * 220.0 - 10.0,
                rng.gen::<f64>() * 220.0 - 10.0,
                rng.gen::<f64>() * 30.0,
                rng.gen::<f64>() * 30.0,
            );
            let expected: Vec<Point> = points
                .iter()
                .copied()
                .filter(|p| range.contains(p))
                .collect();
            let found = qt.query(&range);

            assert_eq!(found.len(), qt.count_in(&range));
            assert_eq!(sorted(found), sorted(expected));
        }
    }

    #[test]
    fn test_query_independent_of_capacity() {
        let points = random_points(500, 3);
        let range = BoundingRectangle::new(80.0, 120.0, 40.0, 25.0);

        let results: Vec<Vec<Point>> = [1, 2, 4, 16, 1000]
            .iter()
            .map(|&capacity| {
                let mut qt = Quadtree::new(100.0, 100.0, 100.0, 100.0, capacity);
                qt.insert_all(points.iter().copied()).unwrap();
                sorted(qt.query(&range))
            })
            .collect();

        assert!(!results[0].is_empty());
        for result in &results[1..] {
            assert_eq!(result, &results[0]);
        }
    }

    #[test]
    fn test_query_order_local_then_quadrants() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 1);
        let root = Point::new(9.0, 9.0);
        let bottom_right = Point::new(15.0, 15.0);
        let top_right = Point::new(15.0, 5.0);
        let bottom_left = Point::new(5.0, 15.0);
        let top_left = Point::new(5.0, 5.0);
        for p in [root, bottom_right, top_right, bottom_left, top_left] {
            qt.insert(p).unwrap();
        }

        let found = qt.query(qt.bounds());
        assert_eq!(found, vec![root, top_left, top_right, bottom_left, bottom_right]);
    }

    #[test]
    fn test_query_boundary_points_excluded() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 4);
        qt.insert(Point::new(3.0, 5.0)).unwrap();
        qt.insert(Point::new(3.001, 5.0)).unwrap();

        let found = qt.query(&BoundingRectangle::new(5.0, 5.0, 2.0, 2.0));
        assert_eq!(found, vec![Point::new(3.001, 5.0)]);
    }

    #[test]
    fn test_query_prunes_disjoint_nodes_but_filters_points() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 2);
        // 根节点上的点在查询矩形之外，但根节点与查询矩形相交
        qt.insert(Point::new(1.0, 1.0)).unwrap();
        qt.insert(Point::new(19.0, 1.0)).unwrap();
        qt.insert(Point::new(16.0, 16.0)).unwrap();

        let range = BoundingRectangle::new(16.0, 16.0, 1.0, 1.0);
        assert_eq!(qt.query(&range), vec![Point::new(16.0, 16.0)]);

        // 完全位于树之外的查询矩形
        let outside = BoundingRectangle::new(100.0, 100.0, 5.0, 5.0);
        assert!(qt.query(&outside).is_empty());
    }

    #[test]
    fn test_query_returns_fresh_collection() {
        let mut qt = Quadtree::new(10.0, 10.0, 10.0, 10.0, 4);
        qt.insert(Point::new(2.0, 2.0)).unwrap();

        let mut found = qt.query(qt.bounds());
        found.clear();
        assert_eq!(qt.points(), &[Point::new(2.0, 2.0)]);
        assert_eq!(qt.query(qt.bounds()).len(), 1);
    }
}
