//! # 图片格式模型
//!
//! 支持格式的封闭枚举，取代按扩展名字符串的散落分发：
//! 每个格式在任务建立时确定一次，并决定终化与优化阶段的行为。
//!
//! ## 依赖关系
//! - 被 `models/job.rs`, `batch/collector.rs`, `pipeline/` 使用
//! - 无外部模块依赖

use std::path::Path;

/// 支持的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG (.jpg / .jpeg)
    Jpeg,
    /// PNG (.png)
    Png,
    /// WebP (.webp)
    Webp,
}

impl ImageFormat {
    /// 从扩展名识别格式（不区分大小写；jpeg 归入 jpg 族）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// 从文件路径识别格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// 输出文件使用的规范扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("WebP"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ImageFormat::from_path(&PathBuf::from("/a/b/photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(ImageFormat::from_path(&PathBuf::from("no_extension")), None);
    }

    #[test]
    fn test_canonical_extension() {
        assert_eq!(ImageFormat::from_extension("jpeg").unwrap().extension(), "jpg");
        assert_eq!(ImageFormat::Png.to_string(), "png");
    }
}
