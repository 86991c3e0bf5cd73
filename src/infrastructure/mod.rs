//! 基础设施层（Infrastructure）
//!
//! 只负责文件读写，不认识页面解析与修复规则

pub mod json_export;
pub mod table_store;

use std::path::PathBuf;

use crate::error::AppResult;
use crate::models::StudentRecord;

pub use json_export::{write_records_json, JsonExporter};
pub use table_store::{read_table, write_records, write_table, CsvExporter, Table, COLUMNS};

/// 学生记录导出器
pub trait RecordExporter {
    /// 导出记录，返回写出的文件路径
    fn export(&self, records: &[StudentRecord]) -> AppResult<PathBuf>;
}
