use clap::Parser;
use quadspace::workload::OutputFormat;
use quadspace::{BenchConfig, BenchmarkRunner, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "quadspace.toml")]
    config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    generate_config: bool,

    /// Points generated per round (overrides config file)
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Number of rounds (overrides config file)
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Number of parallel query batches (overrides config file)
    #[arg(short, long)]
    batches: Option<usize>,

    /// Quadtree node capacity (overrides config file)
    #[arg(long)]
    capacity: Option<usize>,

    /// Random seed for reproducible runs (overrides config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Report format (overrides config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level (overrides config file)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 生成默认配置文件
    if args.generate_config {
        let config = BenchConfig::default();
        config.save_to_file(&args.config)?;
        eprintln!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = BenchConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    let workload = &mut config.workload;
    if let Some(points) = args.points {
        workload.total_points = points;
    }
    if let Some(rounds) = args.rounds {
        workload.rounds = rounds;
    }
    if let Some(batches) = args.batches {
        workload.batches = batches;
    }
    if let Some(capacity) = args.capacity {
        workload.capacity = capacity;
    }
    if args.seed.is_some() {
        workload.seed = args.seed;
    }
    if let Some(format) = args.format {
        workload.output_format = format;
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    // 验证配置
    config.validate()?;

    // 初始化日志系统
    init_logging(&config.logging);

    info!("🚀 Starting quadtree benchmark...");
    info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));

    config.print_summary();

    let mut rng = match config.workload.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut runner = BenchmarkRunner::new(config.workload.clone());
    let stdout = std::io::stdout();
    let mut sink = stdout.lock();

    let reports = match runner.run(&mut rng, &mut sink).await {
        Ok(reports) => reports,
        Err(e) => {
            error!("❌ Benchmark aborted: {}", e);
            return Err(e.into());
        }
    };

    let total: u64 = reports.iter().map(|r| r.overlaps).sum();
    let query_ms: f64 = reports.iter().map(|r| r.query_ms).sum();
    info!(
        "✅ Finished {} rounds: {} overlaps in total, {:.2} ms spent querying",
        reports.len(),
        total,
        query_ms
    );

    Ok(())
}

/// 初始化日志系统
///
/// 日志写到 stderr 或文件，stdout 只留给报告
fn init_logging(config: &quadspace::config::LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    match (config.output.as_str(), &config.log_file) {
        ("file", Some(log_file)) => {
            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .expect("Failed to open log file");

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .with(tracing_subscriber::filter::LevelFilter::from_level(filter))
                .init();
        }
    }
}
