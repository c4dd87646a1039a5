//! 匹配结果集合

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::digest::MatchRecord;

/// 派发阶段共享的结果集合
///
/// 追加和长度读取使用同一把互斥锁。长度只增不减。
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Mutex<Vec<MatchRecord>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录，返回追加后的长度
    pub fn push(&self, record: MatchRecord) -> usize {
        let mut records = self.lock();
        records.push(record);
        records.len()
    }

    /// 当前长度 (加锁读取)
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 所有任务结束后冻结为可排序的集合
    pub fn into_match_set(self) -> MatchSet {
        MatchSet {
            records: self
                .records
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    // 追加本身不会 panic，锁中毒时直接取回数据
    fn lock(&self) -> MutexGuard<'_, Vec<MatchRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 冻结后的结果集合，按到达顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    records: Vec<MatchRecord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    /// 按分数升序稳定排序，分数相同的记录保持到达顺序
    pub fn sort_by_score(&mut self) {
        self.records.sort_by_key(MatchRecord::score);
    }
}

impl From<Vec<MatchRecord>> for MatchSet {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
