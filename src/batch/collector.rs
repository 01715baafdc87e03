//! # 文件收集器
//!
//! 列出源目录中的待压缩条目，并应用排除规则。
//!
//! ## 功能
//! - 只列举一级目录（不递归）
//! - 子目录同样作为候选条目返回
//! - 排除规则同时支持字面名称与 glob 模式
//! - 非 UTF-8 名称按有损转换后的文本匹配排除规则，原始名称保留用于打开文件
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `glob` 进行模式匹配

use crate::error::{CompressError, Result};

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// 排除过滤器
#[derive(Debug, Default)]
pub struct ExclusionFilter {
    /// 字面名称
    literals: HashSet<String>,
    /// 可解析为 glob 的条目
    patterns: Vec<glob::Pattern>,
}

impl ExclusionFilter {
    /// 从排除列表构造过滤器
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();

        for entry in entries {
            let entry = entry.as_ref();
            filter.literals.insert(entry.to_string());
            // 无法解析的模式（如不成对的 `[`）只按字面匹配
            if let Ok(pattern) = glob::Pattern::new(entry) {
                filter.patterns.push(pattern);
            }
        }

        filter
    }

    /// 判断裸文件名是否被排除
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.literals.contains(file_name) || self.patterns.iter().any(|p| p.matches(file_name))
    }
}

/// 列出目录中所有未被排除的条目名称
///
/// 顺序与底层目录列举一致，不做排序。
pub fn list_compressible_files(
    directory: &Path,
    filter: &ExclusionFilter,
) -> Result<Vec<OsString>> {
    if !directory.is_dir() {
        return Err(CompressError::DirectoryNotFound {
            path: directory.display().to_string(),
        });
    }

    let entries = fs::read_dir(directory).map_err(|e| CompressError::FileReadError {
        path: directory.display().to_string(),
        source: e,
    })?;

    let mut names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| CompressError::FileReadError {
            path: directory.display().to_string(),
            source: e,
        })?;

        let name = entry.file_name();
        if !filter.is_excluded(&name.to_string_lossy()) {
            names.push(name);
        }
    }

    Ok(names)
}
