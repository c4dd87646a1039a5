//! 随机候选字符串生成

use crossbeam_channel::{Receiver, bounded};
use log::debug;
use rand::Rng;
use rand::distributions::Uniform;
use std::thread;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};

/// 候选字符串生成器
///
/// 长度在 `[min_len, max_len]` 中均匀抽取，每个字符在字母表中均匀抽取。
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    alphabet: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl CandidateGenerator {
    /// 从已校验的配置创建
    pub fn new(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alphabet: config.alphabet.chars().collect(),
            min_len: config.min_len,
            max_len: config.max_len,
        })
    }

    /// 生成一个候选字符串
    pub fn generate<R: Rng>(&self, rng: &mut R) -> String {
        let length = rng.gen_range(self.min_len..=self.max_len);
        let symbols = Uniform::new(0, self.alphabet.len());
        (0..length)
            .map(|_| self.alphabet[rng.sample(&symbols)])
            .collect()
    }

    /// 启动后台生产线程，返回无限的候选流
    ///
    /// 交接通道容量为 0：生产者在上一个候选被取走之前阻塞。
    /// 消费者丢弃流之后，下一次发送失败，生产线程随之退出。
    pub fn spawn(self) -> Result<CandidateStream> {
        let (tx, rx) = bounded::<String>(0);

        thread::Builder::new()
            .name("candidate-generator".to_string())
            .spawn(move || {
                let mut rng = rand::thread_rng();
                loop {
                    if tx.send(self.generate(&mut rng)).is_err() {
                        debug!("候选流已关闭，生成线程退出");
                        break;
                    }
                }
            })
            .map_err(|e| SearchError::GeneratorSpawn(e.to_string()))?;

        Ok(CandidateStream { rx })
    }
}

/// 后台生成线程的输出端
#[derive(Debug)]
pub struct CandidateStream {
    rx: Receiver<String>,
}

impl Iterator for CandidateStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.rx.recv().ok()
    }
}
