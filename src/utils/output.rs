//! # 美化输出工具
//!
//! 提供统一的终端输出样式。`format_*` 返回带标签的行，供写入任意输出流。
//!
//! ## 依赖关系
//! - 被 `archive/`, `batch/`, `commands/` 和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 格式化成功消息
pub fn format_success(msg: &str) -> String {
    format!("{} {}", "[OK]".green().bold(), msg)
}

/// 格式化错误消息
pub fn format_error(msg: &str) -> String {
    format!("{} {}", "[ERR]".red().bold(), msg)
}

/// 格式化警告消息
pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "[WARN]".yellow().bold(), msg)
}

/// 格式化完成消息
pub fn format_done(msg: &str) -> String {
    format!("{} {}", "[DONE]".green().bold(), msg)
}

/// 分隔线
pub fn separator() -> String {
    "─".repeat(60).dimmed().to_string()
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{}", format_error(msg));
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{}", format_warning(msg));
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印压缩进度
pub fn print_compressing(from: &str, to: &str) {
    println!(
        "{} Compressing {} {} {}",
        "[ZIP]".cyan().bold(),
        from.dimmed(),
        "->".cyan(),
        to
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}
