//! # 批量处理模块
//!
//! 提供目录级的批量压缩能力。
//!
//! ## 功能
//! - 列举源目录并应用排除规则
//! - 有界线程池并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{list_compressible_files, ExclusionFilter};
pub use runner::{BatchResult, BatchRunner};
