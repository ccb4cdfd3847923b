use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::quadtree::Quadtree;
use crate::workload::{OutputFormat, OverlapParams};

/// 基准测试配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    /// 工作负载配置
    pub workload: WorkloadConfig,

    /// 日志配置
    pub logging: LoggingConfig,
}

/// 工作负载配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// 每轮生成的点数
    #[serde(default = "default_total_points")]
    pub total_points: usize,

    /// 点分布区域的宽度，区域为 [0, width) × [0, height)
    #[serde(default = "default_width")]
    pub width: f64,

    #[serde(default = "default_height")]
    pub height: f64,

    /// 四叉树节点容量
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// 重复建树和查询的轮数
    #[serde(default = "default_rounds")]
    pub rounds: usize,

    /// 并发查询的批次数
    #[serde(default = "default_batches")]
    pub batches: usize,

    /// 每个点的搜索矩形半边长
    #[serde(default = "default_search_half_extent")]
    pub search_half_extent: f64,

    /// 距离小于该值的两点视为重叠
    #[serde(default = "default_overlap_distance")]
    pub overlap_distance: f64,

    /// 随机数种子，未设置时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,

    /// 输出格式：text, json
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别：trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 日志输出：stdout, file
    #[serde(default = "default_log_output")]
    pub output: String,

    /// 日志文件路径（当 output = file 时）
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// 默认值函数
// ============================================================================

fn default_total_points() -> usize {
    20_000
}

fn default_width() -> f64 {
    200.0
}

fn default_height() -> f64 {
    200.0
}

fn default_capacity() -> usize {
    4
}

fn default_rounds() -> usize {
    5
}

fn default_batches() -> usize {
    10
}

fn default_search_half_extent() -> f64 {
    10.0
}

fn default_overlap_distance() -> f64 {
    3.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_output() -> String {
    "stdout".to_string()
}

// ============================================================================
// 实现
// ============================================================================

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            total_points: default_total_points(),
            width: default_width(),
            height: default_height(),
            capacity: default_capacity(),
            rounds: default_rounds(),
            batches: default_batches(),
            search_half_extent: default_search_half_extent(),
            overlap_distance: default_overlap_distance(),
            seed: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            output: default_log_output(),
            log_file: None,
        }
    }
}

impl WorkloadConfig {
    /// 覆盖整个点分布区域的空四叉树
    pub fn empty_tree(&self) -> Quadtree {
        Quadtree::new(
            self.width / 2.0,
            self.height / 2.0,
            self.width / 2.0,
            self.height / 2.0,
            self.capacity,
        )
    }

    pub fn overlap_params(&self) -> OverlapParams {
        OverlapParams {
            batches: self.batches,
            search_half_extent: self.search_half_extent,
            overlap_distance: self.overlap_distance,
        }
    }
}

impl BenchConfig {
    /// 从文件加载配置
    ///
    /// 配置加载顺序（优先级从低到高）：
    /// 1. 默认配置（内嵌的 default.toml）
    /// 2. 用户配置文件（可选）
    /// 3. 环境变量（QUADSPACE__ 前缀，使用双下划线分隔嵌套）
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use quadspace::config::BenchConfig;
    ///
    /// let config = BenchConfig::from_file("quadspace.toml").unwrap();
    /// ```
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("QUADSPACE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| format!("Failed to load config: {}", e))?;

        Ok(settings
            .try_deserialize()
            .map_err(|e| format!("Failed to parse config: {}", e))?)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, toml_string)
            .map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// 验证配置
    ///
    /// 检查区域大小、容量、批次数、距离参数和日志设置
    pub fn validate(&self) -> Result<(), String> {
        let workload = &self.workload;

        if !(workload.width.is_finite() && workload.width > 0.0)
            || !(workload.height.is_finite() && workload.height > 0.0)
        {
            return Err(format!(
                "Domain must have a positive finite size, got {} x {}",
                workload.width, workload.height
            ));
        }

        if workload.capacity == 0 {
            return Err("Node capacity must be at least 1".to_string());
        }

        // 批次数、搜索半边长、重叠距离
        workload
            .overlap_params()
            .validate()
            .map_err(|e| e.to_string())?;

        // 验证日志级别
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "Invalid log level: '{}'. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ))
            }
        }

        match self.logging.output.as_str() {
            "stdout" => {}
            "file" => {
                if self.logging.log_file.is_none() {
                    return Err(
                        "Log output is 'file' but log_file path is not specified".to_string()
                    );
                }
            }
            other => {
                return Err(format!(
                    "Invalid log output: '{}'. Must be one of: stdout, file",
                    other
                ))
            }
        }

        Ok(())
    }

    /// 打印配置摘要（输出到 stderr，不干扰 stdout 上的报告）
    pub fn print_summary(&self) {
        let w = &self.workload;
        eprintln!("📋 Quadspace Configuration:");
        eprintln!("   Domain:      {} x {}", w.width, w.height);
        eprintln!("   Points:      {} per round", w.total_points);
        eprintln!("   Rounds:      {}", w.rounds);
        eprintln!("   Capacity:    {}", w.capacity);
        eprintln!("   Batches:     {}", w.batches);
        eprintln!(
            "   Search:      ±{} (overlap < {})",
            w.search_half_extent, w.overlap_distance
        );
        match w.seed {
            Some(seed) => eprintln!("   Seed:        {}", seed),
            None => eprintln!("   Seed:        (entropy)"),
        }
        eprintln!("   Output:      {}", w.output_format);
        eprintln!();
        eprintln!("   Log Level:   {}", self.logging.level);
        eprintln!("   Log Output:  {}", self.logging.output);
        if let Some(ref log_file) = self.logging.log_file {
            eprintln!("   Log File:    {}", log_file.display());
        }
        eprintln!();
    }
}
