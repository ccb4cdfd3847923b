// 基准测试工作负载
//
// 随机生成点、批量建树、并发查询重叠点、逐轮输出报告。
// 四叉树本身不依赖这个模块。

pub mod error;
pub mod fanout;
pub mod generator;
pub mod report;
pub mod runner;

pub use error::WorkloadError;
pub use fanout::{count_overlaps, count_overlaps_sequential, OverlapParams};
pub use generator::generate_points;
pub use report::{OutputFormat, RoundReport};
pub use runner::BenchmarkRunner;
