//! # 批量处理模块
//!
//! 提供文件收集与顺序批量执行能力。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 收集待处理图片列表（排除已处理产物）
//! - 顺序执行单文件流水线
//! - 进度反馈与结果汇总
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::SourceSelection;
pub use runner::{BatchRunner, CancelToken, RunSummary};
