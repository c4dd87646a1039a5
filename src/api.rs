//! 对外提供的 Rust 调用接口

use anyhow::Context;
use log::info;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use crate::config::SearchConfig;
use crate::coordinator::{Coordinator, StopReason};
use crate::digest::{DigestEvaluator, Sha256Digester};
use crate::generator::CandidateGenerator;
use crate::report::found_line;
use crate::results::MatchSet;

/// 每个 CPU 核心允许的在途评估任务数
const IN_FLIGHT_PER_CORE: usize = 4;

/// 默认在途任务上限: 4 x 可用并行度
pub fn default_max_in_flight() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        * IN_FLIGHT_PER_CORE
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub config: SearchConfig,
    /// `None` 表示不限制 (每个候选直接起一个线程)
    pub max_in_flight: Option<usize>,
}

impl SearchRequest {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            max_in_flight: Some(default_max_in_flight()),
        }
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// 按到达顺序的匹配
    pub matches: MatchSet,
    pub target: usize,
    pub dispatched: u64,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
    pub speed: f64,
}

impl SearchResponse {
    pub fn reached_target(&self) -> bool {
        self.matches.len() >= self.target
    }
}

/// 用 SHA-256 和随机候选运行一次完整搜索
///
/// 每发现一条匹配立即在标准输出打印一行通知。
pub fn search(request: SearchRequest) -> anyhow::Result<SearchResponse> {
    let config = &request.config;
    let generator = CandidateGenerator::new(config).context("invalid search config")?;

    info!(
        "搜索条件: SHA-256 后缀 {}, 目标 {} 条, 候选长度 {}..={}, 字母表 {} 个字符",
        config.suffix,
        config.target,
        config.min_len,
        config.max_len,
        config.alphabet.chars().count()
    );
    match request.max_in_flight {
        Some(max) => info!("在途任务上限: {}", max),
        None => info!("在途任务上限: 无"),
    }

    let candidates = generator.spawn()?;
    let evaluator = DigestEvaluator::new(Sha256Digester, config.suffix.clone());
    let coordinator =
        Coordinator::new(evaluator, config.target).with_max_in_flight(request.max_in_flight);

    let suffix = config.suffix.as_str();
    let outcome = coordinator.run(candidates, |record| {
        println!("{}", found_line(suffix, record));
    })?;

    let speed = outcome.speed();
    Ok(SearchResponse {
        matches: outcome.matches,
        target: config.target,
        dispatched: outcome.dispatched,
        stop_reason: outcome.stop_reason,
        elapsed: outcome.elapsed,
        speed,
    })
}
