//! 摘要计算与匹配判断

use sha2::{Digest, Sha256};

use crate::config::MATCH_SUFFIX;

/// 摘要函数
///
/// 输出必须是确定的、定长的小写十六进制文本。
/// 默认实现为 SHA-256，测试中可以替换为强制高命中率的假摘要。
pub trait Digester: Send + Sync {
    fn hex_digest(&self, data: &[u8]) -> String;
}

/// SHA-256 摘要 (64个十六进制字符)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn hex_digest(&self, data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }
}

/// 计算摘要中十进制数字字符之和，非数字的十六进制字符贡献 0
///
/// # Example
/// ```
/// use hash_suffix_search::digit_sum;
/// assert_eq!(digit_sum("a1b2c000"), 3);
/// ```
pub fn digit_sum(digest: &str) -> u32 {
    digest.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// 一条匹配记录，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    digest: String,
    score: u32,
}

impl MatchRecord {
    /// 由摘要文本构造，分数自动计算
    pub fn new(digest: String) -> Self {
        let score = digit_sum(&digest);
        Self { digest, score }
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (sum = {})", self.digest, self.score)
    }
}

/// 摘要评估器：候选字符串 -> 是否匹配 + 分数
#[derive(Debug, Clone)]
pub struct DigestEvaluator<D> {
    digester: D,
    suffix: String,
}

impl Default for DigestEvaluator<Sha256Digester> {
    fn default() -> Self {
        Self::new(Sha256Digester, MATCH_SUFFIX)
    }
}

impl<D: Digester> DigestEvaluator<D> {
    pub fn new(digester: D, suffix: impl Into<String>) -> Self {
        Self {
            digester,
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// 计算候选字符串的摘要，后缀匹配时返回记录
    ///
    /// 纯函数：不匹配时没有任何可观察的副作用。
    pub fn evaluate(&self, candidate: &str) -> Option<MatchRecord> {
        let digest = self.digester.hex_digest(candidate.as_bytes());
        digest
            .ends_with(self.suffix.as_str())
            .then(|| MatchRecord::new(digest))
    }
}
