//! # 批量执行器
//!
//! 在有界线程池中并行执行压缩任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，每个文件一个任务
//! - `run` 在全部任务结束（成功或失败）后才返回
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::archive::{CompressionResult, Outcome};
use crate::error::{CompressError, Result};
use crate::utils::progress;

use indicatif::ProgressBar;
use rayon::prelude::*;

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (源文件路径, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并单个压缩结果
    pub fn merge(&mut self, result: CompressionResult) {
        match result.outcome {
            Outcome::Success => self.success += 1,
            Outcome::Failure(reason) => {
                self.failed += 1;
                self.failures
                    .push((result.task.source.display().to_string(), reason));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 = 逻辑 CPU 数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            show_progress: true,
        }
    }

    /// 关闭进度条
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表，阻塞直到所有任务完成
    pub fn run<T, F>(&self, items: &[T], processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T, &ProgressBar) -> CompressionResult + Sync + Send,
    {
        let pb = if self.show_progress {
            progress::create_progress_bar(items.len() as u64, "Compressing")
        } else {
            ProgressBar::hidden()
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| CompressError::ThreadPool(e.to_string()))?;

        // install 在并行迭代全部结束后才返回
        let results: Vec<CompressionResult> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item, &pb);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::FileTask;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn task(name: &str) -> FileTask {
        FileTask {
            source: PathBuf::from(name),
            destination: PathBuf::from(format!("{}.zip", name)),
        }
    }

    #[test]
    fn test_auto_jobs() {
        assert_eq!(BatchRunner::new(0).jobs(), num_cpus::get());
        assert_eq!(BatchRunner::new(3).jobs(), 3);
    }

    #[test]
    fn test_every_item_resolved_before_return() {
        let items: Vec<String> = (0..50).map(|i| format!("file{}", i)).collect();
        let calls = AtomicUsize::new(0);

        let result = BatchRunner::new(4)
            .quiet()
            .run(&items, |name, _| {
                calls.fetch_add(1, Ordering::SeqCst);
                if name == "file7" {
                    CompressionResult::failure(task(name), "injected")
                } else {
                    CompressionResult::success(task(name))
                }
            })
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 50);
        assert_eq!(result.total(), 50);
        assert_eq!(result.success, 49);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failures, vec![("file7".to_string(), "injected".to_string())]);
    }

    #[test]
    fn test_empty_batch() {
        let items: Vec<String> = Vec::new();
        let result = BatchRunner::new(2)
            .quiet()
            .run(&items, |name, _| CompressionResult::success(task(name)))
            .unwrap();
        assert_eq!(result.total(), 0);
    }
}
