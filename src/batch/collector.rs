//! # 文件收集器
//!
//! 根据输入路径收集待处理图片列表。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 递归目录搜索，按路径字典序排序
//! - 排除已带 `.wm.` 标记的文件（重复运行不会二次摄入）
//! - 目录模式下重建 `<目录名>-marked` 同级输出目录，
//!   并在其中镜像源目录的相对子目录结构
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `models/format.rs`, `models/job.rs`

use crate::error::{ImgmarkError, Result};
use crate::models::{is_marked, ImageFormat};

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 输出目录的同级后缀
pub const TARGET_DIR_SUFFIX: &str = "-marked";

/// 输入选择：单文件或目录
#[derive(Debug, Clone)]
pub enum SourceSelection {
    /// 单个图片文件
    File(PathBuf),
    /// 待扫描的目录
    Directory(PathBuf),
}

impl SourceSelection {
    /// 检测输入路径类型
    pub fn detect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ImgmarkError::NotFound {
                path: path.display().to_string(),
            });
        }
        if path.is_file() {
            Ok(SourceSelection::File(path.to_path_buf()))
        } else if path.is_dir() {
            Ok(SourceSelection::Directory(path.to_path_buf()))
        } else {
            Err(ImgmarkError::InvalidArgument {
                path: path.display().to_string(),
            })
        }
    }
}

/// 收集待处理文件列表（目录模式排序且排除已标记文件）
pub fn collect(selection: &SourceSelection) -> Result<Vec<PathBuf>> {
    match selection {
        SourceSelection::File(path) => {
            if ImageFormat::from_path(path).is_none() {
                return Err(ImgmarkError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
            Ok(vec![path.clone()])
        }
        SourceSelection::Directory(dir) => {
            let mut files: Vec<PathBuf> = WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| is_candidate(e.path()))
                .map(|e| e.path().to_path_buf())
                .collect();

            files.sort();
            Ok(files)
        }
    }
}

/// 计算源文件对应的输出目录：目录模式下镜像源目录的相对结构，
/// 保证不同子目录下同名文件的输出路径互不冲突
pub fn destination_dir(source: &Path, base: Option<&Path>, out_dir: &Path) -> PathBuf {
    if let Some(base) = base {
        if let Some(rel) = source.parent().and_then(|p| p.strip_prefix(base).ok()) {
            if !rel.as_os_str().is_empty() {
                return out_dir.join(rel);
            }
        }
    }
    out_dir.to_path_buf()
}

/// 预建输出目录下的镜像子目录
pub fn prepare_subdirs(files: &[PathBuf], base: &Path, out_dir: &Path) -> Result<()> {
    for file in files {
        let dir = destination_dir(file, Some(base), out_dir);
        if dir != out_dir {
            fs::create_dir_all(&dir).map_err(|e| ImgmarkError::TargetDirError {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// 目录模式下重建输出目录（先删除再新建，保证本次运行独占）
pub fn prepare_target_dir(source_dir: &Path) -> Result<PathBuf> {
    let name = source_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("images");
    let target = source_dir
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}{}", name, TARGET_DIR_SUFFIX));

    if target.exists() {
        fs::remove_dir_all(&target).map_err(|e| ImgmarkError::TargetDirError {
            path: target.display().to_string(),
            source: e,
        })?;
    }
    fs::create_dir_all(&target).map_err(|e| ImgmarkError::TargetDirError {
        path: target.display().to_string(),
        source: e,
    })?;

    Ok(target)
}

/// 检查文件是否为待处理候选：支持的扩展名且未带处理标记
fn is_candidate(path: &Path) -> bool {
    if ImageFormat::from_path(path).is_none() {
        return false;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => !is_marked(name),
        None => false,
    }
}
