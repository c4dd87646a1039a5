//! 错误类型定义

use thiserror::Error;

/// 库的错误类型
///
/// 搜索核心本身 (随机生成、哈希、求和、追加、排序) 不会失败，
/// 只有配置校验和线程创建可能出错。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// 配置参数无效 (字母表为空、长度范围错误、后缀不是十六进制等)
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// 无法启动候选字符串生成线程
    #[error("failed to spawn candidate generator: {0}")]
    GeneratorSpawn(String),

    /// 无法为候选字符串创建评估线程 (通常是系统线程资源耗尽)
    #[error("failed to spawn evaluator task: {0}")]
    TaskSpawn(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
