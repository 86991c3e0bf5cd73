//! 抽取处理器 - 编排层
//!
//! ## 职责
//!
//! 负责"逐页文本 → 学生记录表"这一遍处理。
//!
//! ## 核心功能
//!
//! 1. **加载页面**：按物理顺序读入逐页文本
//! 2. **逐页解析与聚合**：委托 `workflow::aggregate_pages`
//! 3. **导出**：CSV 表格 + JSON 记录
//! 4. **统计输出**：页数、丢弃数、学生数

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::{CsvExporter, JsonExporter, RecordExporter};
use crate::models::{load_pages, StudentRecord};
use crate::workflow::{aggregate_pages, AggregationStats, PageFlow};

/// 一次抽取的结果
#[derive(Debug)]
pub struct ExtractSummary {
    pub records: Vec<StudentRecord>,
    pub stats: AggregationStats,
    /// 实际写出的文件
    pub outputs: Vec<PathBuf>,
}

/// 处理一份逐页文本
///
/// # 参数
/// - `flow`: 单页流程
/// - `pages_path`: 逐页文本文件
/// - `exporters`: 记录导出器
///
/// # 返回
/// 没有解析到任何学生时不写文件，返回空结果
pub async fn process_extract(
    flow: &PageFlow,
    pages_path: &Path,
    exporters: &[Box<dyn RecordExporter>],
) -> AppResult<ExtractSummary> {
    info!("📄 正在读取逐页文本: {}", pages_path.display());
    let pages = load_pages(pages_path).await?;

    let (records, stats) = aggregate_pages(flow, &pages);

    let mut outputs = Vec::new();
    if records.is_empty() {
        warn!("⚠️ 未解析到有效学生数据，请确认页面格式是否与示例一致");
        return Ok(ExtractSummary {
            records,
            stats,
            outputs,
        });
    }

    for exporter in exporters {
        let path = exporter.export(&records)?;
        info!("✓ 已生成: {}", path.display());
        outputs.push(path);
    }

    log_extract_complete(&stats);

    Ok(ExtractSummary {
        records,
        stats,
        outputs,
    })
}

/// 默认的导出器：CSV 表格 + JSON 记录
pub fn default_exporters(table_path: PathBuf, json_path: PathBuf) -> Vec<Box<dyn RecordExporter>> {
    vec![
        Box::new(CsvExporter::new(table_path)),
        Box::new(JsonExporter::new(json_path)),
    ]
}

fn log_extract_complete(stats: &AggregationStats) {
    info!(
        "抽取统计: 页数 {}, 丢弃 {}, 宽松归属 {}, 无段落内容 {}, 学生 {}",
        stats.pages, stats.discarded, stats.relaxed, stats.untitled, stats.students
    );
}
