//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 参数结构
//! 单一位置参数（源文件或目录）加布尔开关，与原脚本的调用方式保持一致：
//! 默认执行完整流水线，各 `--no-*` 开关跳过对应阶段。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 参数传递给 `commands/process.rs`

use clap::Parser;
use std::path::PathBuf;

/// Imgmark - 批量图片水印工具
#[derive(Parser, Debug)]
#[command(name = "imgmark")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A batch image watermarking pipeline", long_about = None)]
pub struct Cli {
    /// Source image file or directory to process
    pub source: PathBuf,

    /// Skip the optimization stage (jpegoptim/optipng)
    #[arg(long, default_value_t = false)]
    pub no_optimize: bool,

    /// Skip resizing even for oversized images
    #[arg(long, default_value_t = false)]
    pub no_resize: bool,

    /// Skip watermark compositing
    #[arg(long, default_value_t = false)]
    pub no_watermark: bool,

    /// Use the black watermark variant (for light backgrounds)
    #[arg(long, default_value_t = false)]
    pub black: bool,

    /// Use the small watermark variant
    #[arg(long, default_value_t = false)]
    pub small: bool,

    /// Delete the original file after successful processing
    #[arg(long, default_value_t = false)]
    pub delete_original: bool,

    /// Convert output to WebP instead of keeping the source format
    #[arg(long, default_value_t = false)]
    pub webp: bool,

    /// Longest output side in pixels; larger images are shrunk to fit
    #[arg(long, default_value_t = 2560)]
    pub max_dimension: u32,

    /// JPEG recompression quality bound for the optimize stage
    #[arg(long, default_value_t = 82)]
    pub quality: u8,

    /// Directory containing the watermark variant images
    /// (defaults to the executable's directory)
    #[arg(long)]
    pub watermark_dir: Option<PathBuf>,
}
