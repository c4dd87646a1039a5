//! 搜索协调器：逐个派发候选、汇总匹配、达到目标后停止并等待收尾
//!
//! 状态流转: 派发 -> 收尾 (等待所有在途任务) -> 返回冻结的结果。
//! 报告由调用方负责。
//!
//! 目标数量是下限而不是精确上限：停止派发时仍在途的任务可能继续追加匹配，
//! 最终数量可能超过目标。

use log::{debug, info, trace};
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::digest::{DigestEvaluator, Digester, MatchRecord};
use crate::error::{Result, SearchError};
use crate::results::{MatchSet, ResultSet};

/// 派发停止的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 结果集合达到目标数量
    ThresholdReached,
    /// 候选来源耗尽 (只有有限来源才会发生)
    SourceExhausted,
}

/// 一次搜索的结果和统计
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// 按到达顺序冻结的匹配
    pub matches: MatchSet,
    /// 已派发的候选数量
    pub dispatched: u64,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

impl SearchOutcome {
    /// 平均速度 (候选/秒)
    pub fn speed(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.dispatched as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// 在途任务数量上限 (计数门)
#[derive(Debug)]
pub struct InFlightLimit {
    max: usize,
    active: Mutex<usize>,
    released: Condvar,
}

impl InFlightLimit {
    /// `max` 为 0 时按 1 处理
    pub fn new(max: usize) -> Self {
        Self {
            max: max.max(1),
            active: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// 当前在途数量
    pub fn active(&self) -> usize {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 阻塞直到有空位，返回的许可在丢弃时释放
    pub fn acquire(&self) -> InFlightPermit<'_> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        while *active >= self.max {
            trace!("在途任务已满 ({}), 等待空位", self.max);
            active = self
                .released
                .wait(active)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *active += 1;
        InFlightPermit { limit: self }
    }
}

/// 在途许可
#[derive(Debug)]
pub struct InFlightPermit<'a> {
    limit: &'a InFlightLimit,
}

impl Drop for InFlightPermit<'_> {
    fn drop(&mut self) {
        let mut active = self
            .limit
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *active -= 1;
        self.limit.released.notify_one();
    }
}

/// 搜索协调器
#[derive(Debug, Clone)]
pub struct Coordinator<D> {
    evaluator: DigestEvaluator<D>,
    target: usize,
    max_in_flight: Option<usize>,
}

impl<D: Digester> Coordinator<D> {
    /// 默认不限制在途任务数量
    pub fn new(evaluator: DigestEvaluator<D>, target: usize) -> Self {
        Self {
            evaluator,
            target,
            max_in_flight: None,
        }
    }

    /// 设置在途任务上限，`None` 表示每个候选直接起一个任务
    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// 运行搜索直到匹配数达到目标或来源耗尽
    ///
    /// 每个候选在独立线程中评估；匹配先在锁内追加到结果集合，再调用 `on_match`。
    /// 返回前等待所有已派发的任务结束。
    pub fn run<I, F>(&self, candidates: I, on_match: F) -> Result<SearchOutcome>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&MatchRecord) + Sync,
    {
        let start_time = Instant::now();
        let results = ResultSet::new();
        let limit = self.max_in_flight.map(InFlightLimit::new);
        let mut candidates = candidates.into_iter();
        let mut dispatched: u64 = 0;

        // scope 结束即收尾屏障：所有任务 join 之后才返回
        let stop_reason = thread::scope(|scope| -> Result<StopReason> {
            let results = &results;
            let on_match = &on_match;
            let evaluator = &self.evaluator;

            loop {
                let found = results.len();
                if found >= self.target {
                    info!(
                        "已找到 {} 条匹配 (目标 {}), 停止派发, 共派发 {} 个候选",
                        found, self.target, dispatched
                    );
                    return Ok(StopReason::ThresholdReached);
                }

                let Some(candidate) = candidates.next() else {
                    info!(
                        "候选来源已耗尽, 已找到 {} 条匹配 (目标 {})",
                        found, self.target
                    );
                    return Ok(StopReason::SourceExhausted);
                };

                let permit = limit.as_ref().map(InFlightLimit::acquire);
                thread::Builder::new()
                    .spawn_scoped(scope, move || {
                        let _permit = permit;
                        if let Some(record) = evaluator.evaluate(&candidate) {
                            let count = results.push(record.clone());
                            debug!("第 {} 条匹配: {}", count, record.digest());
                            on_match(&record);
                        }
                    })
                    .map_err(|e| SearchError::TaskSpawn(e.to_string()))?;
                dispatched += 1;
            }
        })?;

        let matches = results.into_match_set();
        let elapsed = start_time.elapsed();
        info!(
            "全部评估任务已结束: 派发 {} 个, 匹配 {} 条, 耗时 {:.2} 秒",
            dispatched,
            matches.len(),
            elapsed.as_secs_f64()
        );

        Ok(SearchOutcome {
            matches,
            dispatched,
            stop_reason,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 长度为偶数时以 "000" 结尾
    struct ParityDigester;

    impl Digester for ParityDigester {
        fn hex_digest(&self, data: &[u8]) -> String {
            if data.len() % 2 == 0 {
                format!("{:x}000", data.len())
            } else {
                format!("{:x}001", data.len())
            }
        }
    }

    fn coordinator(target: usize) -> Coordinator<ParityDigester> {
        Coordinator::new(DigestEvaluator::new(ParityDigester, "000"), target)
    }

    #[test]
    fn test_source_exhausted_before_target() {
        let candidates = (1..=8).map(|len| "a".repeat(len));
        let outcome = coordinator(100).run(candidates, |_| {}).unwrap();
        assert_eq!(outcome.stop_reason, StopReason::SourceExhausted);
        assert_eq!(outcome.dispatched, 8);
        assert_eq!(outcome.matches.len(), 4);
    }

    #[test]
    fn test_threshold_is_floor() {
        // 无限来源，全部匹配
        let candidates = std::iter::repeat_with(|| "aa".to_string());
        let outcome = coordinator(50)
            .with_max_in_flight(Some(8))
            .run(candidates, |_| {})
            .unwrap();
        assert_eq!(outcome.stop_reason, StopReason::ThresholdReached);
        assert!(outcome.matches.len() >= 50);
        assert_eq!(outcome.matches.len() as u64, outcome.dispatched);
    }

    #[test]
    fn test_zero_target_dispatches_nothing() {
        let outcome = coordinator(0)
            .run(std::iter::repeat_with(|| "aa".to_string()), |_| {})
            .unwrap();
        assert_eq!(outcome.dispatched, 0);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stop_reason, StopReason::ThresholdReached);
    }

    #[test]
    fn test_on_match_called_once_per_match() {
        let calls = AtomicUsize::new(0);
        let candidates = (1..=20).map(|len| "b".repeat(len));
        let outcome = coordinator(1000)
            .run(candidates, |record| {
                assert!(record.digest().ends_with("000"));
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert_eq!(outcome.matches.len(), 10);
    }

    #[test]
    fn test_in_flight_limit_bounds_concurrency() {
        let limit = InFlightLimit::new(3);
        let peak = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..30 {
                let permit = limit.acquire();
                let limit = &limit;
                let peak = &peak;
                scope.spawn(move || {
                    let _permit = permit;
                    peak.fetch_max(limit.active(), Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(2));
                });
            }
        });
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(limit.active(), 0);
    }

    #[test]
    fn test_in_flight_limit_zero_means_one() {
        let limit = InFlightLimit::new(0);
        assert_eq!(limit.max(), 1);
        let permit = limit.acquire();
        assert_eq!(limit.active(), 1);
        drop(permit);
        assert_eq!(limit.active(), 0);
    }

    #[test]
    fn test_speed() {
        let outcome = SearchOutcome {
            matches: MatchSet::default(),
            dispatched: 100,
            stop_reason: StopReason::ThresholdReached,
            elapsed: Duration::from_secs(4),
        };
        assert_eq!(outcome.speed(), 25.0);

        let instant = SearchOutcome {
            elapsed: Duration::ZERO,
            ..outcome
        };
        assert_eq!(instant.speed(), 0.0);
    }
}
