//! 测试公共模块
//!
//! 提供可控命中率的假摘要函数

#![allow(dead_code)]

use hash_suffix_search::Digester;

/// 定长 64 字符的假摘要: 前 61 位是输入长度的十六进制，
/// 长度为偶数时以 "000" 结尾，否则以 "001" 结尾
pub struct ParityDigester;

impl Digester for ParityDigester {
    fn hex_digest(&self, data: &[u8]) -> String {
        let tail = if data.len() % 2 == 0 { "000" } else { "001" };
        format!("{:061x}{}", data.len(), tail)
    }
}

/// 任何输入都匹配，摘要前缀保留输入内容以便区分记录
pub struct AlwaysMatchDigester;

impl Digester for AlwaysMatchDigester {
    fn hex_digest(&self, data: &[u8]) -> String {
        format!("{}000", hex::encode(data))
    }
}

/// 输入以数字结尾且能被 `modulus` 整除时匹配
pub struct ModuloDigester {
    pub modulus: u64,
}

impl Digester for ModuloDigester {
    fn hex_digest(&self, data: &[u8]) -> String {
        let n: u64 = std::str::from_utf8(data)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);
        let tail = if n % self.modulus == 0 { "000" } else { "fff" };
        format!("{:061x}{}", n, tail)
    }
}

/// 由长度构造候选字符串 ("a" 重复)
pub fn candidate_of_len(len: usize) -> String {
    "a".repeat(len)
}
