//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数
//! - `-r/--replacers`: 文件名替换规则 (`D:Z,.txt:,A:R`)
//! - `-e/--exclude`: 冒号分隔的排除名称，支持 glob
//! - `-p/--input_path`: 源目录
//! - `-o/--output_path`: 输出目录
//! - `-j/--jobs`: 并行作业数
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 生成 `config::Overrides`

use crate::config::Overrides;

use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  batchzip .                          compress every file in the current directory into ./zips
  batchzip -r D:Z,.txt:,A:R .         also replace D with Z, drop .txt and replace A with R in archive names
  batchzip -e '*.txt:*.zip' .         skip files ending in .txt or .zip
  batchzip -p /path/to/files -o /path/to/zips";

/// batchzip - 并行批量压缩目录中的文件
#[derive(Parser, Debug)]
#[command(name = "batchzip")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Compress quickly all files in a directory", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Replacers applied to archive names, comma separated KEY:VALUE pairs
    /// (e.g. D:Z,.txt:,A:R). Leave the value empty to delete the key; the
    /// .zip suffix is added automatically
    #[arg(short, long, value_name = "RULES")]
    pub replacers: Option<String>,

    /// Names to leave out, colon separated (e.g. '*.txt:*.zip')
    #[arg(short, long, value_name = "NAMES")]
    pub exclude: Option<String>,

    /// Directory to compress [default: current directory]
    #[arg(short = 'p', long = "input_path", visible_alias = "input-path", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Directory receiving the archives [default: <cwd>/zips]
    #[arg(short = 'o', long = "output_path", visible_alias = "output-path", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Directory to compress, shortcut for --input_path ('.' = current directory)
    #[arg(value_name = "DIR", conflicts_with = "input_path")]
    pub path: Option<PathBuf>,
}

impl Cli {
    /// 没有任何参数时只打印帮助
    pub fn is_help_only(&self) -> bool {
        self.replacers.is_none()
            && self.exclude.is_none()
            && self.input_path.is_none()
            && self.output_path.is_none()
            && self.path.is_none()
    }

    /// 转换为配置覆盖项
    pub fn overrides(&self) -> Overrides {
        Overrides {
            replacers: self.replacers.clone(),
            exclude: self.exclude.clone(),
            input_path: self.input_path.clone().or_else(|| self.path.clone()),
            output_path: self.output_path.clone(),
            jobs: self.jobs,
            no_progress: self.no_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_help_only() {
        let cli = Cli::try_parse_from(["batchzip"]).unwrap();
        assert!(cli.is_help_only());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "batchzip", "-r", "A:B,.txt:", "-e", "*.py:*.log", "-p", "/new/input", "-o",
            "/new/output", "-j", "3", "--no-progress",
        ])
        .unwrap();

        assert!(!cli.is_help_only());
        let overrides = cli.overrides();
        assert_eq!(overrides.replacers.as_deref(), Some("A:B,.txt:"));
        assert_eq!(overrides.exclude.as_deref(), Some("*.py:*.log"));
        assert_eq!(overrides.input_path, Some(PathBuf::from("/new/input")));
        assert_eq!(overrides.output_path, Some(PathBuf::from("/new/output")));
        assert_eq!(overrides.jobs, 3);
        assert!(overrides.no_progress);
    }

    #[test]
    fn test_long_flags_with_underscores() {
        let cli = Cli::try_parse_from([
            "batchzip",
            "--input_path",
            "in",
            "--output-path",
            "out",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.input_path, Some(PathBuf::from("in")));
        assert_eq!(overrides.output_path, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_positional_path() {
        let cli = Cli::try_parse_from(["batchzip", "."]).unwrap();
        assert!(!cli.is_help_only());
        assert_eq!(cli.overrides().input_path, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_positional_conflicts_with_input_path() {
        assert!(Cli::try_parse_from(["batchzip", "-p", "a", "b"]).is_err());
    }
}
