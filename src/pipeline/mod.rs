//! # 单文件处理流水线
//!
//! 将一个源文件转换为一个目标文件。阶段顺序执行，前一阶段失败则
//! 跳过其余阶段并将任务标记为失败：
//!
//! 1. 缩放决策（依据元数据与配置）
//! 2. 规格化：解码 + 旋转校正 + 按需缩放 -> 无损中间文件
//! 3. 水印合成（可选，右下角，固定不透明度）
//! 4. 格式终化：目标为 PNG 时直接移动中间文件，否则重编码
//! 5. 优化（可选；WebP 无优化器，跳过）
//!
//! 中间文件的清理与原图删除由 `batch/runner.rs` 在任务边界完成。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `models/`, `error.rs`
//! - 子模块: magick, metadata, optimize

pub mod magick;
pub mod metadata;
pub mod optimize;

use crate::error::{ImgmarkError, Result};
use crate::models::{ImageFormat, ImageJob, ImageMetadata, JobConfig};

use std::fs;

/// 缩放决策：仅当启用缩放且（尺寸未知或最长边超限）时缩放
pub fn should_resize(config: &JobConfig, meta: &ImageMetadata) -> bool {
    if !config.resize_enabled {
        return false;
    }
    match meta.max_side {
        Some(side) => side > config.max_dimension,
        None => true,
    }
}

/// 执行阶段 1-5，返回首个失败阶段的错误
pub fn process(job: &ImageJob, config: &JobConfig, meta: &ImageMetadata) -> Result<()> {
    let resize_to = if should_resize(config, meta) {
        Some(config.max_dimension)
    } else {
        None
    };

    magick::normalize(&job.source, &job.work_path, resize_to).map_err(|e| {
        ImgmarkError::ConversionFailed {
            path: job.source.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    if config.watermark_enabled {
        magick::composite_watermark(&config.watermark_image, &job.work_path).map_err(|e| {
            ImgmarkError::WatermarkFailed {
                path: job.source.display().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    if job.target_format == ImageFormat::Png {
        // 中间文件本身就是 PNG，直接移动到目标路径
        fs::rename(&job.work_path, &job.destination).map_err(|e| {
            ImgmarkError::ConversionFailed {
                path: job.source.display().to_string(),
                reason: format!("failed to move intermediate: {}", e),
            }
        })?;
    } else {
        magick::transcode(&job.work_path, &job.destination).map_err(|e| {
            ImgmarkError::ConversionFailed {
                path: job.source.display().to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    if config.optimize_enabled {
        optimize::optimize(&job.destination, job.target_format, config.jpeg_quality).map_err(
            |e| ImgmarkError::OptimizationFailed {
                path: job.destination.display().to_string(),
                reason: e.to_string(),
            },
        )?;
    }

    Ok(())
}
