//! 终端报告输出

use std::io::{self, Write};

use crate::digest::MatchRecord;
use crate::results::MatchSet;

/// 发现匹配时的通知行
pub fn found_line(suffix: &str, record: &MatchRecord) -> String {
    format!("Found a hash ending with {}: {}", suffix, record.digest())
}

/// 报告写入器
///
/// 输出顺序: `Unsorted hashes:` 块、完成提示、`Sorted hashes:` 块。
/// 每行格式为 `<digest> (sum = <score>)`。
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 按到达顺序输出，不修改集合
    pub fn write_unsorted(&mut self, matches: &MatchSet) -> io::Result<()> {
        writeln!(self.out, "Unsorted hashes:")?;
        self.write_records(matches)
    }

    pub fn write_completion(&mut self) -> io::Result<()> {
        writeln!(self.out, "All evaluation tasks finished")
    }

    /// 调用方需先调用 [`MatchSet::sort_by_score`]
    pub fn write_sorted(&mut self, matches: &MatchSet) -> io::Result<()> {
        writeln!(self.out, "Sorted hashes:")?;
        self.write_records(matches)
    }

    /// 完整报告：未排序、完成提示、排序后
    pub fn write_report(&mut self, mut matches: MatchSet) -> io::Result<MatchSet> {
        self.write_unsorted(&matches)?;
        self.write_completion()?;
        matches.sort_by_score();
        self.write_sorted(&matches)?;
        self.out.flush()?;
        Ok(matches)
    }

    fn write_records(&mut self, matches: &MatchSet) -> io::Result<()> {
        for record in matches {
            writeln!(self.out, "{}", record)?;
        }
        Ok(())
    }
}

impl Default for Reporter<io::Stdout> {
    fn default() -> Self {
        Self::new(io::stdout())
    }
}
