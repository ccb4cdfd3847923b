use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use super::error::WorkloadError;
use super::fanout::count_overlaps;
use super::generator::generate_points;
use super::report::RoundReport;
use crate::config::WorkloadConfig;
use crate::quadtree::{Quadtree, QuadtreeError};

/// 多轮基准测试
///
/// 每一轮：生成随机点 → 单线程建树 → 并发查询重叠点 → 输出报告 → 清空树。
/// 建树和查询两个阶段不会重叠，清空只在所有查询任务结束后进行。
#[derive(Debug)]
pub struct BenchmarkRunner {
    config: WorkloadConfig,
    /// 跨轮复用的树；建树失败时丢弃，下一轮重新创建
    tree: Option<Quadtree>,
}

impl BenchmarkRunner {
    pub fn new(config: WorkloadConfig) -> Self {
        Self {
            config,
            tree: None,
        }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// 替换工作负载配置，缓存的树按新的区域和容量重新创建
    pub fn set_config(&mut self, config: WorkloadConfig) {
        self.config = config;
        self.tree = None;
    }

    /// 运行全部轮次，每轮结束后把报告写入 `sink`
    pub async fn run<R, W>(
        &mut self,
        rng: &mut R,
        sink: &mut W,
    ) -> Result<Vec<RoundReport>, WorkloadError>
    where
        R: Rng + ?Sized,
        W: Write + ?Sized,
    {
        let mut reports = Vec::with_capacity(self.config.rounds);
        for round in 0..self.config.rounds {
            let report = self.run_round(round, rng).await?;
            report.write_to(sink, self.config.output_format)?;
            sink.flush()?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// 运行单轮
    ///
    /// 随机点在调用方线程上生成；建树和查询都在阻塞任务中进行。
    pub async fn run_round<R>(
        &mut self,
        round: usize,
        rng: &mut R,
    ) -> Result<RoundReport, WorkloadError>
    where
        R: Rng + ?Sized,
    {
        let points = generate_points(
            rng,
            self.config.total_points,
            self.config.width,
            self.config.height,
        );

        // 建树阶段：在阻塞任务中单线程顺序插入，不占用运行时的工作线程。
        // 插入失败时树在任务内被丢弃，下一轮重新创建。
        let mut tree = match self.tree.take() {
            Some(tree) => tree,
            None => self.config.empty_tree(),
        };
        let (tree, points, build_ms) = tokio::task::spawn_blocking(move || {
            let build_start = Instant::now();
            tree.insert_all(points.iter().copied())?;
            let build_ms = build_start.elapsed().as_secs_f64() * 1000.0;
            Ok::<_, QuadtreeError>((tree, points, build_ms))
        })
        .await??;
        let depth = tree.depth();
        let nodes = tree.node_count();
        debug!(
            "Round {}: built tree with {} points, depth {}, {} nodes in {:.2} ms",
            round,
            points.len(),
            depth,
            nodes,
            build_ms
        );

        // 查询阶段：树只读共享给所有任务
        let query_start = Instant::now();
        let shared = Arc::new(tree);
        let overlaps = count_overlaps(
            Arc::clone(&shared),
            Arc::new(points),
            self.config.overlap_params(),
        )
        .await?;
        let query_ms = query_start.elapsed().as_secs_f64() * 1000.0;

        let mut tree = Arc::try_unwrap(shared).map_err(|_| WorkloadError::TreeStillShared)?;
        tree.clear();
        self.tree = Some(tree);

        info!(
            "Round {} finished: {} overlaps ({:.2} ms build, {:.2} ms query)",
            round, overlaps, build_ms, query_ms
        );

        Ok(RoundReport {
            round,
            points: self.config.total_points,
            overlaps,
            depth,
            nodes,
            build_ms,
            query_ms,
        })
    }
}
