//! # 归档模块
//!
//! 单文件压缩：一个源文件对应一个只含单个条目的 zip 归档。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 和 `batch/runner.rs` 使用
//! - 子模块: naming, writer

pub mod naming;
pub mod writer;

pub use naming::derive_archive_name;
pub use writer::ArchiveWriter;

use std::path::PathBuf;

/// 单个压缩任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// 源文件路径
    pub source: PathBuf,
    /// 输出归档路径
    pub destination: PathBuf,
}

/// 压缩结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
}

/// 单个任务的压缩结果
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub task: FileTask,
    pub outcome: Outcome,
}

impl CompressionResult {
    pub fn success(task: FileTask) -> Self {
        Self {
            task,
            outcome: Outcome::Success,
        }
    }

    pub fn failure(task: FileTask, reason: impl Into<String>) -> Self {
        Self {
            task,
            outcome: Outcome::Failure(reason.into()),
        }
    }
}
