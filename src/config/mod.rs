//! # 运行配置
//!
//! 将内置默认值与命令行覆盖项合并为不可变的 [`Configuration`]。
//!
//! ## 合并策略
//! - 替换规则：覆盖项叠加在默认规则之上（同键覆盖）
//! - 排除列表：覆盖项追加到默认列表之后
//! - 指定输出目录时，输出目录本身也加入排除列表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 和 `commands/` 使用
//! - 子模块: replacers

pub mod replacers;

pub use replacers::ReplacementRules;

use crate::error::{CompressError, Result};

use std::path::{Path, PathBuf};

/// 默认输出目录名
pub const DEFAULT_OUTPUT_DIR: &str = "zips";

/// 程序自身名称（默认排除）
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// 可执行文件名（Windows 上带 `.exe`）
pub fn program_file_name() -> String {
    format!("{}{}", PROGRAM_NAME, std::env::consts::EXE_SUFFIX)
}

/// 内置默认值
#[derive(Debug, Clone)]
pub struct Defaults {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub rules: ReplacementRules,
    pub exclusions: Vec<String>,
}

impl Defaults {
    /// 以给定目录为工作目录构造默认值
    pub fn from_cwd(cwd: &Path) -> Self {
        let mut exclusions = vec![PROGRAM_NAME.to_string(), DEFAULT_OUTPUT_DIR.to_string()];
        push_unique(&mut exclusions, &program_file_name());

        Self {
            source_dir: cwd.to_path_buf(),
            destination_dir: cwd.join(DEFAULT_OUTPUT_DIR),
            rules: ReplacementRules::defaults(),
            exclusions,
        }
    }

    /// 以当前进程工作目录构造默认值
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| CompressError::Other(format!("Cannot resolve working directory: {}", e)))?;
        Ok(Self::from_cwd(&cwd))
    }
}

/// 用户提供的覆盖项（全部可选）
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `key:value` 逗号分隔列表
    pub replacers: Option<String>,
    /// 冒号分隔的排除名称
    pub exclude: Option<String>,
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    /// 并行作业数（0 = 自动）
    pub jobs: usize,
    /// 不显示进度条
    pub no_progress: bool,
}

/// 解析完成的运行配置，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    source_dir: PathBuf,
    destination_dir: PathBuf,
    rules: ReplacementRules,
    exclusions: Vec<String>,
    jobs: usize,
    no_progress: bool,
}

impl Configuration {
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn rules(&self) -> &ReplacementRules {
        &self.rules
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    pub fn no_progress(&self) -> bool {
        self.no_progress
    }
}

/// 合并默认值与覆盖项
pub fn resolve(defaults: Defaults, overrides: &Overrides) -> Configuration {
    let Defaults {
        source_dir,
        destination_dir,
        mut rules,
        mut exclusions,
    } = defaults;

    if let Some(raw) = &overrides.replacers {
        rules.merge(&ReplacementRules::parse(raw));
    }

    if let Some(raw) = &overrides.exclude {
        for name in raw.split(':').filter(|s| !s.is_empty()) {
            push_unique(&mut exclusions, name);
        }
    }

    let source_dir = overrides.input_path.clone().unwrap_or(source_dir);

    let destination_dir = match &overrides.output_path {
        Some(path) => {
            push_unique(&mut exclusions, &path.to_string_lossy());
            // 目录列举得到的是裸名称，因此最后一级目录名同样需要排除
            if let Some(name) = path.file_name() {
                push_unique(&mut exclusions, &name.to_string_lossy());
            }
            path.clone()
        }
        None => destination_dir,
    };

    Configuration {
        source_dir,
        destination_dir,
        rules,
        exclusions,
        jobs: overrides.jobs,
        no_progress: overrides.no_progress,
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}
