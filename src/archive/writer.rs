//! # 归档写入器
//!
//! 将单个源文件压缩为单条目 zip 归档。
//!
//! ## 功能
//! - 由命名规则推导输出路径
//! - Deflate 压缩，条目名为源文件的裸名称
//! - 写入前打印进度，失败时打印错误并转换为失败结果，不向上传播
//! - 失败时删除未写完的归档
//! - 归档路径与源文件相同时拒绝写入
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `archive/naming.rs` 推导文件名
//! - 使用 `zip` 写入归档

use super::{derive_archive_name, CompressionResult, FileTask};
use crate::config::ReplacementRules;
use crate::error::{CompressError, Result};
use crate::utils::output;

use indicatif::ProgressBar;
use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate 压缩级别
pub const DEFLATE_LEVEL: i64 = 8;

/// 超过该大小的条目使用 ZIP64
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// 归档写入器，在所有工作线程间只读共享
pub struct ArchiveWriter<'a> {
    destination_dir: &'a Path,
    rules: &'a ReplacementRules,
}

impl<'a> ArchiveWriter<'a> {
    pub fn new(destination_dir: &'a Path, rules: &'a ReplacementRules) -> Self {
        Self {
            destination_dir,
            rules,
        }
    }

    /// 为源文件构造压缩任务
    pub fn task_for(&self, source: &Path) -> FileTask {
        let source_name = source.to_string_lossy();
        let archive_name = derive_archive_name(&source_name, self.rules);

        FileTask {
            source: source.to_path_buf(),
            destination: self.destination_dir.join(archive_name),
        }
    }

    /// 压缩单个文件
    ///
    /// 任何错误都只影响本文件，结果以 [`CompressionResult`] 返回。
    pub fn compress_one(&self, source: &Path, progress: &ProgressBar) -> CompressionResult {
        let task = self.task_for(source);

        progress.suspend(|| {
            output::print_compressing(
                &task.source.display().to_string(),
                &task.destination.display().to_string(),
            );
        });

        match write_archive(&task) {
            Ok(()) => CompressionResult::success(task),
            Err(e) => {
                progress.suspend(|| {
                    output::print_error(&format!(
                        "Error compressing {}: {}",
                        task.source.display(),
                        e
                    ));
                });
                CompressionResult::failure(task, e.to_string())
            }
        }
    }
}

/// 写入归档；失败时删除残留文件
fn write_archive(task: &FileTask) -> Result<()> {
    let read_err = |e: io::Error| CompressError::FileReadError {
        path: task.source.display().to_string(),
        source: e,
    };

    let entry_name = task
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CompressError::Other(format!("No file name in {}", task.source.display()))
        })?;

    let mut source = File::open(&task.source).map_err(read_err)?;
    let metadata = source.metadata().map_err(read_err)?;

    // File::create 会先截断目标，必须在此之前拦截
    if targets_source(task) {
        return Err(CompressError::SourceOverwrite {
            path: task.destination.display().to_string(),
        });
    }

    let file = File::create(&task.destination).map_err(|e| CompressError::FileWriteError {
        path: task.destination.display().to_string(),
        source: e,
    })?;

    let result = fill_archive(file, &mut source, &entry_name, &metadata, task);
    if result.is_err() {
        fs::remove_file(&task.destination).ok();
    }
    result
}

/// 归档路径是否就是源文件
fn targets_source(task: &FileTask) -> bool {
    let Some(name) = task.destination.file_name() else {
        return false;
    };
    let parent = match task.destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    match (fs::canonicalize(&task.source), fs::canonicalize(parent)) {
        (Ok(source), Ok(dir)) => source == dir.join(name),
        _ => false,
    }
}

fn fill_archive(
    file: File,
    source: &mut File,
    entry_name: &str,
    metadata: &Metadata,
    task: &FileTask,
) -> Result<()> {
    let archive_err = |e: zip::result::ZipError| CompressError::ArchiveError {
        path: task.destination.display().to_string(),
        source: e,
    };

    let mut zip = ZipWriter::new(BufWriter::new(file));
    zip.start_file(entry_name, entry_options(metadata))
        .map_err(archive_err)?;

    io::copy(source, &mut zip).map_err(|e| CompressError::FileReadError {
        path: task.source.display().to_string(),
        source: e,
    })?;

    let mut inner = zip.finish().map_err(archive_err)?;
    inner.flush().map_err(|e| CompressError::FileWriteError {
        path: task.destination.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 条目选项：Deflate，保留 unix 权限
fn entry_options(metadata: &Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(DEFLATE_LEVEL))
        .large_file(metadata.len() >= ZIP64_THRESHOLD);

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Outcome;
    use std::io::Read;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("zips");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();
        (dir, src, dst)
    }

    #[test]
    fn test_task_for_uses_rules() {
        let rules = ReplacementRules::defaults();
        let writer = ArchiveWriter::new(Path::new("/mock/zips"), &rules);
        let task = writer.task_for(Path::new("/mock/path/file1.txt"));

        assert_eq!(task.source, PathBuf::from("/mock/path/file1.txt"));
        assert_eq!(task.destination, PathBuf::from("/mock/zips/file1.zip"));
    }

    #[test]
    fn test_compress_one_writes_single_entry() {
        let (_dir, src, dst) = setup();
        let contents = "hello archive\n".repeat(100);
        let source = src.join("notes.txt");
        fs::write(&source, &contents).unwrap();

        let rules = ReplacementRules::defaults();
        let writer = ArchiveWriter::new(&dst, &rules);
        let result = writer.compress_one(&source, &ProgressBar::hidden());

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.task.destination, dst.join("notes.zip"));

        let mut archive = zip::ZipArchive::new(File::open(dst.join("notes.zip")).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "notes.txt");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);

        let mut restored = String::new();
        entry.read_to_string(&mut restored).unwrap();
        assert_eq!(restored, contents);
    }

    #[test]
    fn test_missing_source_is_failure() {
        let (_dir, src, dst) = setup();
        let rules = ReplacementRules::defaults();
        let writer = ArchiveWriter::new(&dst, &rules);

        let result = writer.compress_one(&src.join("ghost.bin"), &ProgressBar::hidden());

        assert!(matches!(result.outcome, Outcome::Failure(_)));
        assert!(!dst.join("ghost.bin.zip").exists());
    }

    #[test]
    fn test_missing_destination_is_failure() {
        let (_dir, src, dst) = setup();
        let source = src.join("a.csv");
        fs::write(&source, b"1,2,3").unwrap();

        let rules = ReplacementRules::defaults();
        let nowhere = dst.join("not-created");
        let writer = ArchiveWriter::new(&nowhere, &rules);

        let result = writer.compress_one(&source, &ProgressBar::hidden());
        assert!(matches!(result.outcome, Outcome::Failure(_)));
    }

    #[test]
    fn test_zip_source_in_own_directory_gets_new_archive() {
        let (_dir, src, _dst) = setup();
        let payload = vec![7u8; 1200];
        let source = src.join("bundle.zip");
        fs::write(&source, &payload).unwrap();

        let rules = ReplacementRules::defaults();
        let writer = ArchiveWriter::new(&src, &rules);
        let result = writer.compress_one(&source, &ProgressBar::hidden());

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.task.destination, src.join("bundle.zip.zip"));
        assert_eq!(fs::read(&source).unwrap(), payload);
    }

    #[test]
    fn test_archive_path_equal_to_source_is_refused() {
        let (_dir, src, _dst) = setup();
        let payload = vec![7u8; 1200];
        let source = src.join("bundle.zip");
        fs::write(&source, &payload).unwrap();

        // 去掉 .zip 后再追加，归档名与源文件重合
        let mut rules = ReplacementRules::new();
        rules.insert(".zip", "");
        let writer = ArchiveWriter::new(&src, &rules);
        let result = writer.compress_one(&source, &ProgressBar::hidden());

        assert_eq!(result.task.destination, source);
        assert!(matches!(result.outcome, Outcome::Failure(_)));
        assert_eq!(fs::read(&source).unwrap(), payload);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_source_fails_without_leftover() {
        let (_dir, src, dst) = setup();
        let nested = src.join("nested");
        fs::create_dir(&nested).unwrap();

        let rules = ReplacementRules::defaults();
        let writer = ArchiveWriter::new(&dst, &rules);
        let result = writer.compress_one(&nested, &ProgressBar::hidden());

        assert!(matches!(result.outcome, Outcome::Failure(_)));
        assert!(!dst.join("nested.zip").exists());
    }
}
