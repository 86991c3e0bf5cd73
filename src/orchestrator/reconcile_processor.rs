//! 修复处理器 - 编排层
//!
//! 读回抽取结果表格，逐行修复"我的原文 / 更多表达"两列，写出到新文件。
//! 其他列原样保留；输入文件不会被覆盖。

use std::path::Path;

use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::{read_table, write_table, Table};
use crate::models::SectionKind;
use crate::services::reconcile;
use crate::utils::truncate_text;

/// 修复统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    /// 数据行数
    pub rows: usize,
    /// 发生移动或补标签的行数
    pub changed: usize,
}

/// 就地修复表格中的两列
///
/// 表头缺少任一列时返回错误，表格不做任何修改。
pub fn reconcile_table(table: &mut Table) -> AppResult<ReconcileStats> {
    let mine_col = table.section_column(SectionKind::Mine)?;
    let more_col = table.section_column(SectionKind::More)?;

    let mut stats = ReconcileStats::default();
    for row in 0..table.rows.len() {
        let result = reconcile(table.cell(row, mine_col), table.cell(row, more_col));
        stats.rows += 1;
        if result.changed() {
            stats.changed += 1;
            debug!(
                "[第 {} 行] 修复: {:?}, 补标签 {} 行, 更多表达: {}",
                row + 2,
                result.relocation,
                result.labeled,
                truncate_text(&result.more, 40)
            );
        }
        table.set_cell(row, mine_col, result.mine);
        table.set_cell(row, more_col, result.more);
    }

    Ok(stats)
}

/// 读入、修复并写出到新文件
///
/// # 参数
/// - `input`: 抽取阶段写出的表格
/// - `output`: 修复后的表格（必须与输入不同）
pub fn process_reconcile(input: &Path, output: &Path) -> AppResult<ReconcileStats> {
    info!("🔧 正在修复: {}", input.display());
    let mut table = read_table(input)?;
    let stats = reconcile_table(&mut table)?;
    write_table(&table, output)?;

    info!(
        "✓ 处理完成，已保存: {} (共 {} 行, 修改 {} 行)",
        output.display(),
        stats.rows,
        stats.changed
    );
    Ok(stats)
}
