use crate::quadtree::QuadtreeError;

/// 工作负载错误类型
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    #[error("index error: {0}")]
    Index(#[from] QuadtreeError),

    /// 查询任务 panic 或被取消
    #[error("query worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("tree is still shared after all query workers joined")]
    TreeStillShared,

    #[error("invalid workload parameters: {0}")]
    InvalidParams(String),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
