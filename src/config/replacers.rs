//! # 文件名替换规则
//!
//! 有序的 `匹配子串 -> 替换子串` 规则表。
//!
//! ## 规则
//! - 按插入顺序依次应用，后面的规则看到前面规则的结果
//! - 重复的键覆盖旧值，但保留原有位置
//! - 命令行格式: `D:Z,.txt:,A:R`
//!
//! ## 依赖关系
//! - 被 `config/mod.rs` 和 `archive/naming.rs` 使用
//! - 无外部模块依赖

/// 有序替换规则表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementRules {
    rules: Vec<(String, String)>,
}

impl ReplacementRules {
    /// 创建空规则表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置默认规则：去掉 `.txt` 和前导 `./`
    pub fn defaults() -> Self {
        let mut rules = Self::new();
        rules.insert(".txt", "");
        rules.insert("./", "");
        rules
    }

    /// 解析命令行规则字符串
    ///
    /// 逗号分隔的 `key:value` 对。值可以为空 (`.txt:`)；
    /// 不含恰好一个冒号的片段，去掉冒号后整体作为键，值为空字符串。
    pub fn parse(raw: &str) -> Self {
        let mut rules = Self::new();

        for token in raw.split(',').filter(|t| !t.is_empty()) {
            let parts: Vec<&str> = token.split(':').collect();
            let (key, value) = if parts.len() == 2 {
                (parts[0].to_string(), parts[1].to_string())
            } else {
                (token.replace(':', ""), String::new())
            };

            if key.is_empty() {
                continue;
            }
            rules.insert(key, value);
        }

        rules
    }

    /// 插入规则；已存在的键原地覆盖
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.rules.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.rules.push((key, value)),
        }
    }

    /// 将另一组规则叠加到当前规则之上
    pub fn merge(&mut self, other: &ReplacementRules) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 依次对文本应用全部规则（全局子串替换）
    pub fn apply(&self, text: &str) -> String {
        self.iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}
