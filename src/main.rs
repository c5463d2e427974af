//! # Imgmark - 批量图片水印工具
//!
//! 将原有的图片处理 shell 脚本用 Rust 重构，统一成单一可执行文件。
//! 像素级操作（解码、缩放、合成、重编码、压缩）全部委托给外部命令行工具：
//! ImageMagick (`magick`)、`jpegoptim`、`optipng`。
//!
//! ## 处理流程
//! 收集文件 -> 逐个执行流水线（缩放决策 -> 规格化 -> 水印 -> 格式终化 -> 优化）
//! -> 清理中间文件 -> 汇总结果
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli.rs      (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   ├── batch/      (文件收集与批量执行)
//!   ├── pipeline/   (单文件处理流水线)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod pipeline;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            utils::output::print_error(&format!("{}", e));
            std::process::exit(1);
        }
    }
}
