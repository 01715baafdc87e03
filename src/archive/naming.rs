//! # 归档文件命名
//!
//! 由源文件名推导输出归档名：取最后一级路径，依次应用替换规则，追加 `.zip`。
//!
//! ## 依赖关系
//! - 被 `archive/writer.rs` 使用
//! - 使用 `config/replacers.rs`

use crate::config::ReplacementRules;

use std::path::is_separator;

/// 归档后缀
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// 推导归档文件名
///
/// 只按当前平台的路径分隔符切分；后缀总是追加，源文件本身是 `.zip` 时得到 `.zip.zip`。
pub fn derive_archive_name(source_name: &str, rules: &ReplacementRules) -> String {
    let base = source_name
        .rsplit(is_separator)
        .next()
        .unwrap_or(source_name);

    // 替换值引入的分隔符不能变成子目录
    let transformed = rules.apply(base).replace(is_separator, "_");

    format!("{}{}", transformed, ARCHIVE_SUFFIX)
}
