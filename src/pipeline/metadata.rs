//! # 元数据探测
//!
//! 尽力读取图片的尺寸与内嵌说明文字。两项读取相互独立，任一失败
//! 都不会中止任务，仅记为警告，对应字段保持未知。
//!
//! 尺寸用于缩放决策；说明文字仅作状态行展示，不影响流水线行为。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `pipeline/magick.rs` 的命令调用封装

use crate::error::{ImgmarkError, Result};
use crate::models::ImageMetadata;
use crate::pipeline::magick::run_tool;

use std::path::Path;

/// 探测单个文件的元数据，返回元数据与警告信息
pub fn probe(path: &Path) -> (ImageMetadata, Vec<String>) {
    let mut meta = ImageMetadata::default();
    let mut warnings = Vec::new();

    match read_max_side(path) {
        Ok(side) => meta.max_side = Some(side),
        Err(e) => warnings.push(format!(
            "Failed to read dimensions of {}: {}",
            path.display(),
            e
        )),
    }

    match read_caption(path) {
        Ok(caption) => meta.caption = caption,
        Err(e) => warnings.push(format!("Failed to read caption of {}: {}", path.display(), e)),
    }

    (meta, warnings)
}

/// 读取宽高中较大者
fn read_max_side(path: &Path) -> Result<u32> {
    let out = run_tool(
        "magick",
        vec![
            "identify".into(),
            "-format".into(),
            "%w %h".into(),
            path.as_os_str().into(),
        ],
    )?;

    parse_dimensions(&out).ok_or_else(|| ImgmarkError::CommandFailed {
        command: "magick identify".to_string(),
        stderr: format!("unexpected output: {:?}", out),
    })
}

/// 读取内嵌说明 (IPTC Caption-Abstract)，空串视为无
fn read_caption(path: &Path) -> Result<Option<String>> {
    let out = run_tool(
        "magick",
        vec![
            "identify".into(),
            "-format".into(),
            "%[IPTC:2:120]".into(),
            path.as_os_str().into(),
        ],
    )?;

    let caption = out.trim();
    if caption.is_empty() {
        Ok(None)
    } else {
        Ok(Some(caption.to_string()))
    }
}

/// 解析 "宽 高" 输出，取较大者
fn parse_dimensions(out: &str) -> Option<u32> {
    let mut parts = out.split_whitespace();
    let w: u32 = parts.next()?.parse().ok()?;
    let h: u32 = parts.next()?.parse().ok()?;
    Some(w.max(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("4032 3024"), Some(4032));
        assert_eq!(parse_dimensions("1080 1920\n"), Some(1920));
        assert_eq!(parse_dimensions("800 800"), Some(800));
        assert_eq!(parse_dimensions(""), None);
        assert_eq!(parse_dimensions("garbage"), None);
        assert_eq!(parse_dimensions("1024"), None);
    }
}
