//! # 统一错误处理模块
//!
//! 定义 batchzip 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// batchzip 统一错误类型
#[derive(Error, Debug)]
pub enum CompressError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 归档错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build archive {path}: {source}")]
    ArchiveError {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Archive path is the source file itself: {path}")]
    SourceOverwrite { path: String },

    // ─────────────────────────────────────────────────────────────
    // 运行环境
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CompressError>;
