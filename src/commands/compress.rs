//! # 批量压缩命令实现
//!
//! 将源目录中的每个条目并行压缩为独立的 zip 归档。
//!
//! ## 流程
//! 1. 创建输出目录（已存在则跳过），整个运行只做一次
//! 2. 列举源目录并应用排除规则
//! 3. 每个文件一个任务，提交到有界线程池
//! 4. 等待全部任务结束后打印统计与完成消息
//!
//! 单个文件失败只记录，不影响其他任务，也不改变退出状态。
//! 两个源文件映射到同一归档名时只给出警告，后完成的会覆盖先完成的。
//!
//! ## 依赖关系
//! - 使用 `config/` 提供的 Configuration
//! - 使用 `batch/` 列举文件、并行执行
//! - 使用 `archive/` 写入归档
//! - 使用 `utils/output.rs`

use crate::archive::{ArchiveWriter, CompressionResult};
use crate::batch::{list_compressible_files, BatchResult, BatchRunner, ExclusionFilter};
use crate::config::Configuration;
use crate::error::{CompressError, Result};
use crate::utils::output;

use indicatif::ProgressBar;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 完成消息
pub const COMPLETION_MESSAGE: &str = "All files have been compressed";

/// 失败详情最多显示条数
const MAX_LISTED_FAILURES: usize = 10;

/// 执行批量压缩
pub fn execute(config: &Configuration) -> Result<()> {
    output::print_header("Compressing files");
    output::print_info(&format!(
        "Source: '{}'  Destination: '{}'",
        config.source_dir().display(),
        config.destination_dir().display()
    ));

    if !config.rules().is_empty() {
        output::print_info(&format!(
            "Applying {} replacement rule(s) to archive names",
            config.rules().len()
        ));
    }

    let mut runner = BatchRunner::new(config.jobs());
    if config.no_progress() {
        runner = runner.quiet();
    }
    output::print_info(&format!("Using {} worker(s)", runner.jobs()));

    compress_all(config, &runner)?;
    Ok(())
}

/// 压缩源目录中的全部文件，所有任务结束后打印统计与完成消息
pub fn compress_all(config: &Configuration, runner: &BatchRunner) -> Result<BatchResult> {
    let writer = ArchiveWriter::new(config.destination_dir(), config.rules());
    // 不持有 stdout 锁：工作线程仍在打印进度
    compress_and_report(
        config,
        runner,
        |source, pb| writer.compress_one(source, pb),
        &mut io::stdout(),
    )
}

/// 执行批量压缩，全部任务结束后把统计和完成消息写入 `out`
pub fn compress_and_report<F, W>(
    config: &Configuration,
    runner: &BatchRunner,
    processor: F,
    out: &mut W,
) -> Result<BatchResult>
where
    F: Fn(&Path, &ProgressBar) -> CompressionResult + Sync + Send,
    W: Write,
{
    let result = compress_all_with(config, runner, processor)?;

    write_report(&result, out).map_err(|e| CompressError::FileWriteError {
        path: "report output".to_string(),
        source: e,
    })?;

    Ok(result)
}

/// 使用给定的单文件处理函数执行批量压缩，返回时所有任务均已结束
pub fn compress_all_with<F>(
    config: &Configuration,
    runner: &BatchRunner,
    processor: F,
) -> Result<BatchResult>
where
    F: Fn(&Path, &ProgressBar) -> CompressionResult + Sync + Send,
{
    // 在分发前创建，避免工作线程竞争
    ensure_destination(config.destination_dir())?;

    let filter = ExclusionFilter::new(config.exclusions());
    let files = list_compressible_files(config.source_dir(), &filter)?;

    if files.is_empty() {
        output::print_warning(&format!(
            "Nothing to compress in '{}'",
            config.source_dir().display()
        ));
        return Ok(BatchResult::default());
    }

    output::print_info(&format!("Found {} file(s) to compress", files.len()));

    let sources: Vec<PathBuf> = files
        .iter()
        .map(|name| config.source_dir().join(name))
        .collect();

    let writer = ArchiveWriter::new(config.destination_dir(), config.rules());
    for (destination, names) in find_collisions(&writer, &sources) {
        output::print_warning(&format!(
            "{} will be overwritten, shared by: {}",
            destination.display(),
            names.join(", ")
        ));
    }

    runner.run(&sources, |source, pb| processor(source.as_path(), pb))
}

/// 创建输出目录（幂等）
fn ensure_destination(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| CompressError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 找出被多个源文件共用的归档路径
fn find_collisions(writer: &ArchiveWriter, sources: &[PathBuf]) -> Vec<(PathBuf, Vec<String>)> {
    let mut by_destination: HashMap<PathBuf, Vec<String>> = HashMap::new();
    for source in sources {
        let task = writer.task_for(source);
        by_destination
            .entry(task.destination)
            .or_default()
            .push(source.display().to_string());
    }

    let mut collisions: Vec<_> = by_destination
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .collect();
    collisions.sort();
    collisions
}

/// 写出统计与完成消息
fn write_report<W: Write>(result: &BatchResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", output::separator())?;
    writeln!(
        out,
        "{}",
        output::format_success(&format!(
            "Batch complete: {} succeeded, {} failed",
            result.success, result.failed
        ))
    )?;

    if !result.failures.is_empty() {
        writeln!(out, "{}", output::format_warning("Failed files:"))?;
        for (path, err) in result.failures.iter().take(MAX_LISTED_FAILURES) {
            writeln!(out, "{}", output::format_error(&format!("  {}: {}", path, err)))?;
        }
        if result.failures.len() > MAX_LISTED_FAILURES {
            writeln!(
                out,
                "{}",
                output::format_warning(&format!(
                    "  ... and {} more",
                    result.failures.len() - MAX_LISTED_FAILURES
                ))
            )?;
        }
    }

    writeln!(out, "{}", output::format_done(COMPLETION_MESSAGE))?;
    out.flush()
}
