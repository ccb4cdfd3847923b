pub mod algorithms;
pub mod error;
pub mod point;
pub mod quadrant;
#[allow(clippy::module_inception)]
pub mod quadtree;
pub mod rectangle;

// 重新导出主要类型
pub use error::QuadtreeError;
pub use point::Point;
pub use quadrant::Quadrant;
pub use quadtree::{NodeVisualization, Quadtree, TreeVisualization};
pub use rectangle::BoundingRectangle;
