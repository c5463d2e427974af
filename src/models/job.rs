//! # 任务模型
//!
//! 定义单次运行的不可变配置、单个文件的处理任务及其派生路径。
//!
//! ## 命名约定
//! 输出文件命名为 `<原始主名>.wm.<目标扩展名>`，`.wm.` 标记用于区分
//! 已处理产物与原始文件，目录扫描会排除带标记的文件，避免重复摄入。
//!
//! ## 依赖关系
//! - 被 `batch/`, `pipeline/`, `commands/` 使用
//! - 使用 `models/format.rs`

use crate::error::{ImgmarkError, Result};
use crate::models::format::ImageFormat;

use std::path::{Path, PathBuf};

/// 输出文件名中的"已处理"标记
pub const MARKER: &str = "wm";

/// 检查文件名是否已带处理标记
pub fn is_marked(file_name: &str) -> bool {
    file_name.contains(".wm.")
}

/// 单次运行的不可变配置，由命令行参数构建一次
#[derive(Debug)]
pub struct JobConfig {
    /// 最长边像素上限
    pub max_dimension: u32,
    /// JPEG 优化质量上限
    pub jpeg_quality: u8,
    /// 是否启用缩放
    pub resize_enabled: bool,
    /// 是否启用水印
    pub watermark_enabled: bool,
    /// 是否启用优化
    pub optimize_enabled: bool,
    /// 成功后是否删除原始文件
    pub delete_original_enabled: bool,
    /// 是否统一转为 WebP
    pub convert_to_webp: bool,
    /// 水印图片路径
    pub watermark_image: PathBuf,
}

/// 任务状态机：Pending -> Processing -> {Succeeded, Failed}，无重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Processing,
    Succeeded,
    Failed,
}

/// 单个文件的元数据（尽力读取，读取失败记为未知）
#[derive(Debug, Default)]
pub struct ImageMetadata {
    /// 宽高中较大者
    pub max_side: Option<u32>,
    /// 内嵌图片说明（仅作信息展示，不影响流水线决策）
    pub caption: Option<String>,
}

/// 一个处理单元：一个源文件及其派生路径
#[derive(Debug)]
pub struct ImageJob {
    /// 源文件路径
    pub source: PathBuf,
    /// 最终输出路径
    pub destination: PathBuf,
    /// 无损中间文件路径（流水线工作文件）
    pub work_path: PathBuf,
    /// 目标输出格式
    pub target_format: ImageFormat,
    /// 任务状态
    pub status: JobStatus,
}

impl ImageJob {
    /// 由源文件派生任务：目标格式、输出路径与中间文件路径
    pub fn new(source: &Path, out_dir: &Path, convert_to_webp: bool) -> Result<Self> {
        let source_format =
            ImageFormat::from_path(source).ok_or_else(|| ImgmarkError::UnsupportedFormat {
                path: source.display().to_string(),
            })?;

        let target_format = if convert_to_webp {
            ImageFormat::Webp
        } else {
            source_format
        };

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");

        let destination = out_dir.join(format!("{}.{}.{}", stem, MARKER, target_format.extension()));
        // 中间文件固定为 PNG（无损），与目标格式无关
        let work_path = out_dir.join(format!("{}.{}.tmp.png", stem, MARKER));

        Ok(ImageJob {
            source: source.to_path_buf(),
            destination,
            work_path,
            target_format,
            status: JobStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_marked() {
        assert!(is_marked("photo.wm.jpg"));
        assert!(is_marked("photo.wm.tmp.png"));
        assert!(!is_marked("photo.jpg"));
        assert!(!is_marked("wm.jpg"));
        assert!(!is_marked("firmware.bin"));
    }

    #[test]
    fn test_destination_keeps_source_format() {
        let job = ImageJob::new(Path::new("/in/photo.JPEG"), Path::new("/out"), false).unwrap();
        assert_eq!(job.destination, PathBuf::from("/out/photo.wm.jpg"));
        assert_eq!(job.work_path, PathBuf::from("/out/photo.wm.tmp.png"));
        assert_eq!(job.target_format, ImageFormat::Jpeg);
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[test]
    fn test_destination_webp_conversion() {
        let job = ImageJob::new(Path::new("/in/photo.png"), Path::new("/out"), true).unwrap();
        assert_eq!(job.destination, PathBuf::from("/out/photo.wm.webp"));
        assert_eq!(job.target_format, ImageFormat::Webp);
    }

    #[test]
    fn test_destination_never_aliases_source() {
        // 输出名带 .wm. 标记，重扫目录时不会被再次选中
        let job = ImageJob::new(Path::new("/in/photo.jpg"), Path::new("/in"), false).unwrap();
        assert_ne!(job.destination, job.source);
        let name = job.destination.file_name().unwrap().to_str().unwrap();
        assert!(is_marked(name));
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let err = ImageJob::new(Path::new("/in/notes.txt"), Path::new("/out"), false);
        assert!(matches!(
            err,
            Err(crate::error::ImgmarkError::UnsupportedFormat { .. })
        ));
    }
}
