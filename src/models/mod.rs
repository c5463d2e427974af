//! # 数据模型模块
//!
//! 定义流水线的核心数据结构。
//!
//! ## 依赖关系
//! - 被 `batch/`, `pipeline/`, `commands/` 使用
//! - 子模块: format, job

pub mod format;
pub mod job;

pub use format::ImageFormat;
pub use job::{is_marked, ImageJob, ImageMetadata, JobConfig, JobStatus};
