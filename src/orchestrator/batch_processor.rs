//! 批量处理入口 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责按运行模式依次执行两遍处理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、编译解析模式
//! 2. **抽取**：逐页文本 → 学生记录表（CSV + JSON）
//! 3. **修复**：读回记录表 → 修复两列 → 写出新表
//! 4. **全局统计**：汇总两遍处理的结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单页或单行的细节
//! - **顺序执行**：修复读的是抽取刚写出的文件

use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::orchestrator::extract_processor::{default_exporters, process_extract, ExtractSummary};
use crate::orchestrator::reconcile_processor::{process_reconcile, ReconcileStats};
use crate::utils::logging::init_log_file;
use crate::workflow::PageFlow;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// 只抽取
    Extract,
    /// 只修复已有的抽取结果
    Reconcile,
    /// 抽取后立即修复
    All,
}

impl FromStr for RunMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extract" => Ok(RunMode::Extract),
            "reconcile" => Ok(RunMode::Reconcile),
            "all" => Ok(RunMode::All),
            other => Err(AppError::Config(ConfigError::InvalidArgument {
                argument: other.to_string(),
            })),
        }
    }
}

/// 一次运行的汇总
#[derive(Debug, Default)]
pub struct RunReport {
    pub extract: Option<ExtractSummary>,
    pub reconcile: Option<ReconcileStats>,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: PageFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let flow = PageFlow::new()?;
        Ok(Self { config, flow })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, mode: RunMode) -> AppResult<RunReport> {
        let mut report = RunReport::default();

        if matches!(mode, RunMode::Extract | RunMode::All) {
            let summary = process_extract(
                &self.flow,
                &PathBuf::from(&self.config.pages_path),
                &default_exporters(
                    self.config.extract_table_path(),
                    self.config.records_json_path(),
                ),
            )
            .await?;
            let produced_table = !summary.outputs.is_empty();
            report.extract = Some(summary);

            // 没有写出表格时无需修复
            if mode == RunMode::All && !produced_table {
                print_final_stats(&report, &self.config);
                return Ok(report);
            }
        }

        if matches!(mode, RunMode::Reconcile | RunMode::All) {
            let stats = process_reconcile(
                &self.config.extract_table_path(),
                &self.config.processed_table_path(),
            )?;
            report.reconcile = Some(stats);
        }

        print_final_stats(&report, &self.config);
        Ok(report)
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷抽取与修复");
    info!("📁 输出目录: {}", config.output_dir().display());
    info!("{}", "=".repeat(60));
}

fn print_final_stats(report: &RunReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    if let Some(extract) = &report.extract {
        info!(
            "✅ 抽取: {} 页 → {} 位同学 (丢弃 {} 页)",
            extract.stats.pages, extract.stats.students, extract.stats.discarded
        );
    }
    if let Some(stats) = &report.reconcile {
        info!("✅ 修复: {} 行, 修改 {} 行", stats.rows, stats.changed);
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
