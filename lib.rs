pub mod config;
pub mod quadtree;
pub mod workload;

use std::error::Error;

// 重新导出主要的公共接口
pub use quadtree::{BoundingRectangle, Point, Quadrant, Quadtree, QuadtreeError};

// 重新导出驱动程序使用的类型
pub use config::BenchConfig;
pub use workload::{BenchmarkRunner, OverlapParams, RoundReport, WorkloadError};

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
