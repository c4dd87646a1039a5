//! SHA-256 后缀搜索 - 多线程暴力搜索实现
//!
//! 不断生成随机字符串并计算 SHA-256 摘要，收集十六进制文本以 `000` 结尾的摘要，
//! 直到数量达到目标，然后按到达顺序和按数字和排序后各输出一次。

pub mod api;
pub mod config;
pub mod coordinator;
pub mod digest;
pub mod error;
pub mod generator;
pub mod report;
pub mod results;

pub use api::{SearchRequest, SearchResponse, default_max_in_flight, search};
pub use config::{
    CHARSET, COUNT_OF_ENOUGH_HASHES, MATCH_SUFFIX, MAX_LEN, MIN_LEN, SearchConfig,
};
pub use coordinator::{Coordinator, InFlightLimit, SearchOutcome, StopReason};
pub use digest::{DigestEvaluator, Digester, MatchRecord, Sha256Digester, digit_sum};
pub use error::SearchError;
pub use generator::{CandidateGenerator, CandidateStream};
pub use report::{Reporter, found_line};
pub use results::{MatchSet, ResultSet};
