//! SHA-256 后缀搜索 - 主程序
//!
//! 使用方式:
//!   cargo run --release
//!   cargo run --release -- --max-in-flight 64
//!   cargo run --release -- --max-in-flight 0   (不限制在途任务)

use clap::Parser;
use log::{info, warn};

use hash_suffix_search::{Reporter, SearchRequest, StopReason, default_max_in_flight, search};

/// 命令行参数
///
/// 字母表、后缀、长度范围和目标数量都是编译期常量，不提供参数。
#[derive(Parser, Debug)]
#[command(name = "hash-suffix-search")]
#[command(about = "并行搜索以 000 结尾的 SHA-256 摘要")]
#[command(version = "0.1.0")]
struct Args {
    /// 同时在途的评估任务上限 (0 表示不限制，默认 4 x CPU 核心数)
    #[arg(long)]
    max_in_flight: Option<usize>,
}

/// 0 表示不限制
fn resolve_max_in_flight(arg: Option<usize>) -> Option<usize> {
    match arg {
        Some(0) => None,
        Some(max) => Some(max),
        None => Some(default_max_in_flight()),
    }
}

/// 主函数
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("启动 SHA-256 后缀搜索");
    info!("参数: {:?}", args);

    let mut request = SearchRequest::default();
    request.max_in_flight = resolve_max_in_flight(args.max_in_flight);

    let response = search(request)?;

    if response.stop_reason != StopReason::ThresholdReached {
        warn!("候选来源提前结束, 匹配数未达到目标");
    }
    info!(
        "检查候选数: {} | 匹配数: {} (目标 {}) | 平均速度: {:.0} 候选/秒",
        response.dispatched,
        response.matches.len(),
        response.target,
        response.speed
    );

    Reporter::default().write_report(response.matches)?;

    Ok(())
}
