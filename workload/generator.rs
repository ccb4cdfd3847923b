use rand::Rng;

use crate::quadtree::Point;

/// 在 `[0, width) × [0, height)` 内均匀生成随机点
///
/// 随机源由调用方传入，使用固定种子即可复现同一组点。
pub fn generate_points<R>(rng: &mut R, count: usize, width: f64, height: f64) -> Vec<Point>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|_| Point::new(rng.gen::<f64>() * width, rng.gen::<f64>() * height))
        .collect()
}
