//! JSON 导出 - 基础设施层
//!
//! 交给评分服务的记录格式：按输出顺序排列的 JSON 数组。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::infrastructure::RecordExporter;
use crate::models::StudentRecord;

/// 把学生记录写成格式化的 JSON 数组
pub fn write_records_json(records: &[StudentRecord], path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    let data = serde_json::to_string_pretty(records)?;
    fs::write(path, data).map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RecordExporter for JsonExporter {
    fn export(&self, records: &[StudentRecord]) -> AppResult<PathBuf> {
        write_records_json(records, &self.path)?;
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_json_field_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.json");
        let record = StudentRecord {
            name: "张三".to_string(),
            score: "85".to_string(),
            more: "更多表达：建议".to_string(),
            ..Default::default()
        };
        JsonExporter::new(path.clone()).export(&[record]).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "张三");
        assert_eq!(first["score"], "85");
        assert_eq!(first["more"], "更多表达：建议");
        assert_eq!(first["class"], "");
    }
}
