//! # 进度显示工具
//!
//! 封装 `indicatif` 提供单行覆盖式状态行 `[i/total] <消息>`，
//! 运行结束后由最终汇总行取代。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};

/// 创建状态行（pos 为当前处理的文件序号）
pub fn create_status_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(ProgressStyle::with_template("[{pos}/{len}] {msg}").unwrap());
    pb
}
