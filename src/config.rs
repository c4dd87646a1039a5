//! 搜索常量和配置定义

use crate::error::{Result, SearchError};

/// 候选字符串字母表 (52个大小写拉丁字母)
pub const CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 候选字符串最小长度 (含)
pub const MIN_LEN: usize = 2;

/// 候选字符串最大长度 (含)
pub const MAX_LEN: usize = 20000;

/// 收集到这么多匹配后停止派发
pub const COUNT_OF_ENOUGH_HASHES: usize = 498;

/// 摘要十六进制文本需要匹配的后缀
pub const MATCH_SUFFIX: &str = "000";

/// 搜索配置
///
/// `Default` 与上面的编译期常量完全一致；命令行不暴露这些参数，
/// `with_*` 方法只用于库调用方和测试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// 字母表
    pub alphabet: String,
    /// 最小长度 (含)
    pub min_len: usize,
    /// 最大长度 (含)
    pub max_len: usize,
    /// 目标匹配数 (下限，不是精确上限)
    pub target: usize,
    /// 匹配后缀 (小写十六进制)
    pub suffix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphabet: CHARSET.to_string(),
            min_len: MIN_LEN,
            max_len: MAX_LEN,
            target: COUNT_OF_ENOUGH_HASHES,
            suffix: MATCH_SUFFIX.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    pub fn with_length_range(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }

    pub fn with_target(mut self, target: usize) -> Self {
        self.target = target;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// 校验配置
    ///
    /// # Example
    /// ```
    /// use hash_suffix_search::SearchConfig;
    /// assert!(SearchConfig::default().validate().is_ok());
    /// assert!(SearchConfig::default().with_alphabet("").validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(SearchError::InvalidConfig(
                "alphabet must not be empty".to_string(),
            ));
        }
        if self.min_len == 0 {
            return Err(SearchError::InvalidConfig(
                "min_len must be greater than 0".to_string(),
            ));
        }
        if self.min_len > self.max_len {
            return Err(SearchError::InvalidConfig(format!(
                "min_len ({}) must not exceed max_len ({})",
                self.min_len, self.max_len
            )));
        }
        if self.suffix.is_empty() {
            return Err(SearchError::InvalidConfig(
                "suffix must not be empty".to_string(),
            ));
        }
        // 摘要是小写十六进制，大写或非十六进制字符永远不会匹配
        if let Some(c) = self
            .suffix
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(SearchError::InvalidConfig(format!(
                "invalid character '{}' in suffix, use lowercase hex digits (0-9, a-f)",
                c
            )));
        }
        Ok(())
    }
}
