//! 表格存储 - 基础设施层
//!
//! 抽取结果以 CSV 表格落盘，修复环节再读回。
//! 读写都是逐格的字符串，未被修改的单元格原样写回。

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{AppError, AppResult, TableError};
use crate::infrastructure::RecordExporter;
use crate::models::{SectionKind, StudentRecord};

/// 输出表格的固定列顺序
pub const COLUMNS: [&str; 11] = [
    "序号",
    "学校",
    "班级",
    "姓名",
    "学号",
    "作答时间",
    "得分",
    "我的原文",
    "语法错误",
    "单句点评",
    "更多表达",
];

/// 读回的通用表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 按段落标题定位列，表头两侧的空白不影响匹配
    pub fn section_column(&self, kind: SectionKind) -> AppResult<usize> {
        self.headers
            .iter()
            .position(|h| SectionKind::from_title(h.trim()) == Some(kind))
            .ok_or_else(|| AppError::missing_column(kind.title()))
    }

    /// 读取单元格，行比表头短时视为空
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 写入单元格，行不够长时补空单元格
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value;
    }
}

/// 一条记录按固定列顺序展开
fn record_row(index: usize, record: &StudentRecord) -> Vec<String> {
    let mut row = vec![
        index.to_string(),
        record.school.clone(),
        record.class.clone(),
        record.name.clone(),
        record.id.clone(),
        record.time.clone(),
        record.score.clone(),
    ];
    row.extend(
        SectionKind::ALL
            .iter()
            .map(|kind| record.section(*kind).to_string()),
    );
    row
}

fn ensure_parent(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    Ok(())
}

/// 写出学生记录表（序号从 1 开始）
pub fn write_records(records: &[StudentRecord], path: &Path) -> AppResult<()> {
    let table = Table {
        headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: records
            .iter()
            .enumerate()
            .map(|(idx, record)| record_row(idx + 1, record))
            .collect(),
    };
    write_table(&table, path)
}

/// 读回表格，所有单元格按字符串保留
pub fn read_table(path: &Path) -> AppResult<Table> {
    if !path.exists() {
        return Err(AppError::file_not_found(path.display().to_string()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(AppError::Table(TableError::EmptyTable {
            path: path.display().to_string(),
        }));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    debug!("读取表格 {}: {} 列, {} 行", path.display(), headers.len(), rows.len());
    Ok(Table { headers, rows })
}

/// 写出表格
pub fn write_table(table: &Table, path: &Path) -> AppResult<()> {
    ensure_parent(path)?;

    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    debug!("写出表格 {}: {} 行", path.display(), table.rows.len());
    Ok(())
}

/// CSV 记录导出器
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RecordExporter for CsvExporter {
    fn export(&self, records: &[StudentRecord]) -> AppResult<PathBuf> {
        write_records(records, &self.path)?;
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(name: &str, mine: &str) -> StudentRecord {
        StudentRecord {
            school: "一中".to_string(),
            class: "1班".to_string(),
            name: name.to_string(),
            id: "001".to_string(),
            time: "10:00".to_string(),
            score: String::new(),
            mine: mine.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_then_read_keeps_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("output.csv");
        let records = vec![
            record("张三", "第一句\n第二句, 带逗号"),
            record("李四", "\"引号\""),
        ];
        write_records(&records, &path).unwrap();

        let table = read_table(&path).unwrap();
        assert_eq!(table.headers, COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 0), "1");
        assert_eq!(table.cell(1, 0), "2");
        assert_eq!(table.cell(0, 7), "第一句\n第二句, 带逗号");
        assert_eq!(table.cell(1, 7), "\"引号\"");
        assert_eq!(table.cell(0, 6), "");
    }

    #[test]
    fn test_short_rows_padded_on_access() {
        let mut table = Table {
            headers: vec!["甲".to_string(), "乙".to_string(), "丙".to_string()],
            rows: vec![vec!["1".to_string()]],
        };
        assert_eq!(table.cell(0, 2), "");
        table.set_cell(0, 2, "新值".to_string());
        assert_eq!(table.rows[0], vec!["1", "", "新值"]);
    }

    #[test]
    fn test_section_column_missing() {
        let table = Table {
            headers: vec!["我的原文".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(table.section_column(SectionKind::Mine).unwrap(), 0);
        assert!(matches!(
            table.section_column(SectionKind::More),
            Err(AppError::Table(TableError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn test_section_column_ignores_padding() {
        let table = Table {
            headers: vec!["序号".to_string(), " 更多表达 ".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(table.section_column(SectionKind::More).unwrap(), 1);
        assert!(table.section_column(SectionKind::Mine).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_table(&dir.path().join("absent.csv")),
            Err(AppError::File(_))
        ));
    }
}
