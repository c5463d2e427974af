//! # 输出优化封装
//!
//! 按目标格式选择优化器：JPEG 用 `jpegoptim` 有损重压缩并剥离元数据，
//! PNG 用 `optipng` 最高档无损压缩，WebP 无对应优化器直接跳过。
//!
//! ## 依赖关系
//! - 被 `pipeline/mod.rs` 使用
//! - 使用 `pipeline/magick.rs` 的命令调用封装

use crate::error::Result;
use crate::models::ImageFormat;
use crate::pipeline::magick::run_tool;

use std::ffi::OsString;
use std::path::Path;

/// optipng 压缩档位（最高）
const OPTIPNG_LEVEL: &str = "-o7";

/// 优化目标文件，返回是否实际执行了优化
pub fn optimize(destination: &Path, format: ImageFormat, jpeg_quality: u8) -> Result<bool> {
    match format {
        ImageFormat::Jpeg => {
            run_tool("jpegoptim", jpegoptim_args(destination, jpeg_quality))?;
            Ok(true)
        }
        ImageFormat::Png => {
            run_tool("optipng", optipng_args(destination))?;
            Ok(true)
        }
        // WebP 无对应优化器
        ImageFormat::Webp => Ok(false),
    }
}

fn jpegoptim_args(destination: &Path, quality: u8) -> Vec<OsString> {
    vec![
        "--strip-all".into(),
        format!("--max={}", quality).into(),
        destination.as_os_str().into(),
    ]
}

fn optipng_args(destination: &Path) -> Vec<OsString> {
    vec![
        OPTIPNG_LEVEL.into(),
        "-quiet".into(),
        destination.as_os_str().into(),
    ]
}
