//! # process 命令实现
//!
//! 驱动整个批量水印流程。
//!
//! ## 功能
//! - 验证输入路径与水印图片
//! - 目录模式下重建输出目录
//! - 构建运行配置，安装 Ctrl-C 处理器
//! - 顺序执行批量处理并输出汇总
//!
//! ## 依赖关系
//! - 使用 `cli.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `batch/runner.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{collector, BatchRunner, CancelToken, RunSummary, SourceSelection};
use crate::cli::Cli;
use crate::error::{ImgmarkError, Result};
use crate::models::JobConfig;
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行批量水印命令
pub fn execute(args: Cli) -> Result<RunSummary> {
    output::print_header("Batch Watermarking");

    let selection = SourceSelection::detect(&args.source)?;

    // 水印图片在任何处理开始前验证
    let watermark_image =
        resolve_watermark_image(args.watermark_dir.as_deref(), args.black, args.small);
    if !args.no_watermark && !watermark_image.exists() {
        return Err(ImgmarkError::WatermarkMissing {
            path: watermark_image.display().to_string(),
        });
    }

    // 输出目录：目录模式重建同级 -marked 目录，文件模式与源同目录
    let (out_dir, scan_base) = match &selection {
        SourceSelection::Directory(dir) => (collector::prepare_target_dir(dir)?, Some(dir.clone())),
        SourceSelection::File(file) => (
            file.parent().unwrap_or_else(|| Path::new(".")).to_path_buf(),
            None,
        ),
    };

    let files = collector::collect(&selection)?;
    if files.is_empty() {
        output::print_warning(&format!(
            "No images to process under {}",
            args.source.display()
        ));
        return Ok(RunSummary::new(0));
    }
    output::print_info(&format!("Found {} image(s) to process", files.len()));

    // 在输出目录下镜像源目录的相对子目录，避免同名文件的输出互相覆盖
    if let Some(base) = &scan_base {
        collector::prepare_subdirs(&files, base, &out_dir)?;
    }

    let config = JobConfig {
        max_dimension: args.max_dimension,
        jpeg_quality: args.quality,
        resize_enabled: !args.no_resize,
        watermark_enabled: !args.no_watermark,
        optimize_enabled: !args.no_optimize,
        delete_original_enabled: args.delete_original,
        convert_to_webp: args.webp,
        watermark_image,
    };

    // Ctrl-C 置位取消令牌，在下一个任务边界生效
    let cancel = CancelToken::new();
    install_cancel_handler(&cancel);

    let summary = BatchRunner::new(&config, cancel).run(&files, &out_dir, scan_base.as_deref());

    output::print_separator();
    if summary.all_succeeded() {
        output::print_done(&format!(
            "Processed {} image(s) -> {}",
            summary.succeeded,
            out_dir.display()
        ));
    } else {
        if summary.cancelled {
            output::print_warning("Run interrupted, remaining files were not processed");
        }
        if !summary.failures.is_empty() {
            output::print_error(&format!(
                "{} of {} image(s) failed:",
                summary.failed(),
                summary.total
            ));
            for path in &summary.failures {
                eprintln!("  {}", path.display());
            }
        }
        output::print_info(&format!(
            "{} image(s) processed successfully",
            summary.succeeded
        ));
    }

    Ok(summary)
}

/// 安装 Ctrl-C 处理器；安装失败仅告警，运行继续但失去优雅中断能力
fn install_cancel_handler(cancel: &CancelToken) {
    let token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        output::print_warning(&format!("Failed to install Ctrl-C handler: {}", e));
    }
}

/// 按变体开关确定水印文件名（黑色/小尺寸可组合）
fn watermark_file_name(black: bool, small: bool) -> &'static str {
    match (black, small) {
        (false, false) => "watermark.png",
        (true, false) => "watermark-black.png",
        (false, true) => "watermark-small.png",
        (true, true) => "watermark-black-small.png",
    }
}

/// 解析水印图片路径：默认在可执行文件所在目录查找
fn resolve_watermark_image(dir: Option<&Path>, black: bool, small: bool) -> PathBuf {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    dir.join(watermark_file_name(black, small))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watermark_variants() {
        assert_eq!(watermark_file_name(false, false), "watermark.png");
        assert_eq!(watermark_file_name(true, false), "watermark-black.png");
        assert_eq!(watermark_file_name(false, true), "watermark-small.png");
        assert_eq!(watermark_file_name(true, true), "watermark-black-small.png");
    }

    #[test]
    fn test_resolve_with_explicit_dir() {
        let path = resolve_watermark_image(Some(Path::new("/assets")), true, false);
        assert_eq!(path, PathBuf::from("/assets/watermark-black.png"));
    }

    #[test]
    fn test_cancel_handler_reinstall_warns_only() {
        let token = CancelToken::new();
        install_cancel_handler(&token);
        // 重复安装会失败，只应告警，不应 panic
        install_cancel_handler(&token);
        token.cancel();
        assert!(token.is_cancelled());
    }
}
