//! # 命令执行模块
//!
//! 解析配置并执行批量压缩。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config/`
//! - 子模块: compress

pub mod compress;

use crate::cli::Cli;
use crate::config::{self, Defaults};
use crate::error::Result;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    // 配置在任何文件 I/O 之前完全确定
    let config = config::resolve(Defaults::current()?, &cli.overrides());
    compress::execute(&config)
}
