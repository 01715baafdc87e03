//! # batchzip - 目录批量压缩工具
//!
//! 将目录中的每个文件并行压缩为独立的 zip 归档。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── config/   (配置合并)
//!   │     ├── batch/    (文件收集与并行执行)
//!   │     └── archive/  (命名与归档写入)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod archive;
mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod utils;

use clap::{CommandFactory, Parser};
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if cli.is_help_only() {
        Cli::command().print_help().ok();
        println!();
        return;
    }

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
