//! # ImageMagick 调用封装
//!
//! 通过 `magick` 命令完成解码、旋转校正、缩放、水印合成与格式转换。
//! 参数列表由纯函数构建，便于单元测试。
//!
//! ## 依赖关系
//! - 被 `pipeline/mod.rs`, `pipeline/metadata.rs` 使用
//! - 使用 `std::process::Command` 调用外部命令

use crate::error::{ImgmarkError, Result};

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// 中间文件的编码质量
const INTERMEDIATE_QUALITY: &str = "96";
/// 水印合成不透明度
const WATERMARK_DISSOLVE: &str = "90%";

/// 规格化：解码源文件，旋转校正，按需缩放，输出无损中间文件
pub fn normalize(source: &Path, work: &Path, resize_to: Option<u32>) -> Result<()> {
    run_magick(normalize_args(source, work, resize_to))
}

/// 将水印合成到中间文件（右下角，就地覆盖）
pub fn composite_watermark(watermark: &Path, work: &Path) -> Result<()> {
    run_magick(composite_args(watermark, work))
}

/// 将中间文件重编码为目标格式
pub fn transcode(work: &Path, destination: &Path) -> Result<()> {
    run_magick(transcode_args(work, destination))
}

fn normalize_args(source: &Path, work: &Path, resize_to: Option<u32>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![source.as_os_str().into(), "-auto-orient".into()];
    if let Some(n) = resize_to {
        // NxN 为等比例包围盒
        args.push("-resize".into());
        args.push(format!("{}x{}", n, n).into());
    }
    args.push("-quality".into());
    args.push(INTERMEDIATE_QUALITY.into());
    args.push(work.as_os_str().into());
    args
}

fn composite_args(watermark: &Path, work: &Path) -> Vec<OsString> {
    vec![
        "composite".into(),
        "-dissolve".into(),
        WATERMARK_DISSOLVE.into(),
        "-gravity".into(),
        "southeast".into(),
        watermark.as_os_str().into(),
        work.as_os_str().into(),
        work.as_os_str().into(),
    ]
}

fn transcode_args(work: &Path, destination: &Path) -> Vec<OsString> {
    vec![work.as_os_str().into(), destination.as_os_str().into()]
}

fn run_magick(args: Vec<OsString>) -> Result<()> {
    run_tool("magick", args).map(|_| ())
}

/// 调用外部命令，区分"命令不存在"与"命令执行失败"
pub(crate) fn run_tool(program: &str, args: Vec<OsString>) -> Result<String> {
    let output = Command::new(program).args(&args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImgmarkError::CommandNotFound {
                command: program.to_string(),
            }
        } else {
            ImgmarkError::CommandFailed {
                command: program.to_string(),
                stderr: e.to_string(),
            }
        }
    })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(ImgmarkError::CommandFailed {
            command: program.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_normalize_args_with_resize() {
        let args = to_strings(normalize_args(
            Path::new("in.jpg"),
            Path::new("work.png"),
            Some(2560),
        ));
        assert_eq!(
            args,
            vec![
                "in.jpg",
                "-auto-orient",
                "-resize",
                "2560x2560",
                "-quality",
                "96",
                "work.png"
            ]
        );
    }

    #[test]
    fn test_normalize_args_without_resize() {
        let args = to_strings(normalize_args(
            Path::new("in.jpg"),
            Path::new("work.png"),
            None,
        ));
        assert!(!args.contains(&"-resize".to_string()));
        assert_eq!(args.first().unwrap(), "in.jpg");
        assert_eq!(args.last().unwrap(), "work.png");
    }

    #[test]
    fn test_composite_args_bottom_right_in_place() {
        let args = to_strings(composite_args(Path::new("wm.png"), Path::new("work.png")));
        assert_eq!(
            args,
            vec![
                "composite",
                "-dissolve",
                "90%",
                "-gravity",
                "southeast",
                "wm.png",
                "work.png",
                "work.png"
            ]
        );
    }

    #[test]
    fn test_run_tool_missing_command() {
        let err = run_tool("imgmark-no-such-tool", vec![]);
        assert!(matches!(err, Err(ImgmarkError::CommandNotFound { .. })));
    }
}
