use std::fmt;
use std::io::Write;

use colored::*;
use serde::{Deserialize, Serialize};

use super::error::WorkloadError;

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 人类可读的单行文本
    #[default]
    Text,
    /// 每轮一行 JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// 单轮基准测试结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    /// 本轮插入的点数
    pub points: usize,
    /// 找到的重叠点对数（有序计数，每对计两次）
    pub overlaps: u64,
    /// 建树完成后的树深度
    pub depth: usize,
    /// 建树完成后的节点数
    pub nodes: usize,
    pub build_ms: f64,
    pub query_ms: f64,
}

impl RoundReport {
    /// 把报告写入输出
    pub fn write_to<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        format: OutputFormat,
    ) -> Result<(), WorkloadError> {
        match format {
            OutputFormat::Text => writeln!(sink, "{}", self.format_text())?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *sink, self)?;
                writeln!(sink)?;
            }
        }
        Ok(())
    }

    fn format_text(&self) -> String {
        format!(
            "{} Found {} overlapping points {}",
            format!("Round {}:", self.round).blue(),
            self.overlaps.to_string().cyan(),
            format!(
                "(points {}, depth {}, nodes {}, build {:.2} ms, query {:.2} ms)",
                self.points, self.depth, self.nodes, self.build_ms, self.query_ms
            )
            .dimmed()
        )
    }
}
