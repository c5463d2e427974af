//! # 统一错误处理模块
//!
//! 定义 Imgmark 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 输入/配置错误：致命，立即终止整个运行
//! - 流水线阶段错误：仅标记当前任务失败，运行继续处理下一个文件
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Imgmark 统一错误类型
#[derive(Error, Debug)]
pub enum ImgmarkError {
    // ─────────────────────────────────────────────────────────────
    // 输入错误（致命）
    // ─────────────────────────────────────────────────────────────
    #[error("Source path not found: {path}")]
    NotFound { path: String },

    #[error("Source is neither a regular file nor a directory: {path}")]
    InvalidArgument { path: String },

    #[error("Unsupported image format: {path} (expected jpg/jpeg/png/webp)")]
    UnsupportedFormat { path: String },

    // ─────────────────────────────────────────────────────────────
    // 运行前置配置错误（致命）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to recreate target directory: {path}")]
    TargetDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Watermark image not found: {path}")]
    WatermarkMissing { path: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 流水线阶段错误（任务级，非致命）
    // ─────────────────────────────────────────────────────────────
    #[error("Conversion failed: {path}\nReason: {reason}")]
    ConversionFailed { path: String, reason: String },

    #[error("Watermarking failed: {path}\nReason: {reason}")]
    WatermarkFailed { path: String, reason: String },

    #[error("Optimization failed: {path}\nReason: {reason}")]
    OptimizationFailed { path: String, reason: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ImgmarkError>;
