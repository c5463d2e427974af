//! # 批量执行器
//!
//! 顺序执行批量处理任务：一个文件完整走完流水线（含清理）后才开始下一个。
//!
//! ## 功能
//! - 单行覆盖式进度显示 `[i/total] <文件名>`
//! - 任务边界处的取消检查（Ctrl-C 不会中断当前文件）
//! - 结果汇总与失败列表
//!
//! ## 依赖关系
//! - 被 `commands/process.rs` 调用
//! - 使用 `pipeline/` 处理单个文件
//! - 使用 `utils/progress.rs`, `utils/output.rs`

use crate::batch::collector;
use crate::models::{ImageJob, JobConfig, JobStatus};
use crate::pipeline;
use crate::pipeline::metadata;
use crate::utils::{output, progress};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 取消令牌：由信号处理器置位，执行器在任务边界检查
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// 创建新的取消令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// 是否已请求取消
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct RunSummary {
    /// 候选文件总数
    pub total: usize,
    /// 成功数量
    pub succeeded: usize,
    /// 失败的源文件路径（按处理顺序）
    pub failures: Vec<PathBuf>,
    /// 运行是否被中断
    pub cancelled: bool,
}

impl RunSummary {
    /// 创建新的统计，total 为候选文件总数
    pub fn new(total: usize) -> Self {
        RunSummary {
            total,
            ..Default::default()
        }
    }

    /// 记录一个终态任务
    pub fn record(&mut self, job: &ImageJob) {
        match job.status {
            JobStatus::Succeeded => self.succeeded += 1,
            JobStatus::Failed => self.failures.push(job.source.clone()),
            JobStatus::Pending | JobStatus::Processing => {}
        }
    }

    /// 记录一个未能建立任务的失败
    pub fn record_failure(&mut self, source: &Path) {
        self.failures.push(source.to_path_buf());
    }

    /// 失败数量
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// 是否全部成功（零任务视为成功；被中断视为未完成）
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

/// 批量执行器
pub struct BatchRunner<'a> {
    /// 运行配置
    config: &'a JobConfig,
    /// 取消令牌
    cancel: CancelToken,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(config: &'a JobConfig, cancel: CancelToken) -> Self {
        Self { config, cancel }
    }

    /// 顺序处理文件列表；`base` 为目录模式的扫描根，
    /// 用于在输出目录下镜像源文件的相对子目录
    pub fn run(&self, files: &[PathBuf], out_dir: &Path, base: Option<&Path>) -> RunSummary {
        let mut summary = RunSummary::new(files.len());
        let pb = progress::create_status_bar(files.len() as u64);

        for source in files {
            // 取消只在任务边界生效，当前文件总是完整走完清理
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                pb.suspend(|| output::print_warning("Interrupted, stopping before next file"));
                break;
            }

            pb.inc(1);
            let display_name = source
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("?")
                .to_string();
            pb.set_message(display_name.clone());

            let job_out_dir = collector::destination_dir(source, base, out_dir);
            let mut job = match ImageJob::new(source, &job_out_dir, self.config.convert_to_webp) {
                Ok(job) => job,
                Err(e) => {
                    pb.suspend(|| output::print_error(&format!("{}", e)));
                    summary.record_failure(source);
                    continue;
                }
            };
            job.status = JobStatus::Processing;

            let (meta, warnings) = metadata::probe(source);
            for warning in &warnings {
                pb.suspend(|| output::print_warning(warning));
            }
            if let Some(caption) = &meta.caption {
                pb.set_message(format!("{} ({})", display_name, caption));
            }

            let result = pipeline::process(&job, self.config, &meta);

            // 中间文件无条件清理，清理失败仅告警
            if job.work_path.exists() {
                if let Err(e) = fs::remove_file(&job.work_path) {
                    pb.suspend(|| {
                        output::print_warning(&format!(
                            "Failed to remove intermediate {}: {}",
                            job.work_path.display(),
                            e
                        ))
                    });
                }
            }

            match result {
                Ok(()) => {
                    job.status = JobStatus::Succeeded;
                    // 只有成功任务才删除原图，删除失败仅告警
                    if self.config.delete_original_enabled {
                        if let Err(e) = fs::remove_file(source) {
                            pb.suspend(|| {
                                output::print_warning(&format!(
                                    "Failed to delete original {}: {}",
                                    source.display(),
                                    e
                                ))
                            });
                        }
                    }
                }
                Err(e) => {
                    job.status = JobStatus::Failed;
                    pb.suspend(|| output::print_error(&format!("{}", e)));
                }
            }

            summary.record(&job);
        }

        pb.finish_and_clear();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn test_config(delete_original: bool) -> JobConfig {
        JobConfig {
            max_dimension: 2560,
            jpeg_quality: 82,
            resize_enabled: true,
            watermark_enabled: false,
            optimize_enabled: false,
            delete_original_enabled: delete_original,
            convert_to_webp: false,
            watermark_image: PathBuf::from("watermark.png"),
        }
    }

    #[test]
    fn test_empty_run_succeeds() {
        let config = test_config(false);
        let runner = BatchRunner::new(&config, CancelToken::new());
        let tmp = TempDir::new().unwrap();

        let summary = runner.run(&[], tmp.path(), None);
        assert_eq!(summary.total, 0);
        assert!(summary.all_succeeded());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_cancelled_before_first_file() {
        let config = test_config(false);
        let cancel = CancelToken::new();
        cancel.cancel();
        let runner = BatchRunner::new(&config, cancel);
        let tmp = TempDir::new().unwrap();

        let files = vec![tmp.path().join("a.jpg")];
        let summary = runner.run(&files, tmp.path(), None);
        assert!(summary.cancelled);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_failed_job_preserves_source() {
        // 非图片内容的 .jpg：规格化阶段必然失败
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("bad.jpg");
        File::create(&source)
            .unwrap()
            .write_all(b"not an image")
            .unwrap();

        let config = test_config(true);
        let runner = BatchRunner::new(&config, CancelToken::new());
        let summary = runner.run(&[source.clone()], tmp.path(), None);

        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failures, vec![source.clone()]);
        assert_eq!(summary.exit_code(), 1);
        // 失败任务的源文件保留，目标文件不存在
        assert!(source.exists());
        assert!(!tmp.path().join("bad.wm.jpg").exists());
        // 中间文件已被清理
        assert!(!tmp.path().join("bad.wm.tmp.png").exists());
    }

    #[test]
    fn test_summary_record() {
        let tmp = TempDir::new().unwrap();
        let mut ok = ImageJob::new(&tmp.path().join("a.jpg"), tmp.path(), false).unwrap();
        ok.status = JobStatus::Succeeded;
        let mut bad = ImageJob::new(&tmp.path().join("b.png"), tmp.path(), false).unwrap();
        bad.status = JobStatus::Failed;

        let mut summary = RunSummary::new(2);
        summary.record(&ok);
        summary.record(&bad);

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.failures, vec![tmp.path().join("b.png")]);
        assert!(!summary.all_succeeded());
    }
}
