use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 文本转换工具用来分隔物理页的换页符
const PAGE_BREAK: char = '\x0c';

/// TOML 格式的逐页文本
#[derive(Debug, Clone, Deserialize)]
struct PagesDocument {
    #[serde(default)]
    pages: Vec<String>,
}

/// 按扩展名从文件加载逐页文本
///
/// - `.toml`: `pages = ["第一页", "第二页"]`
/// - 其他: 纯文本，以换页符分页
///
/// 页面顺序与文件中一致；空白页原样保留，由聚合阶段决定是否丢弃。
pub async fn load_pages(path: &Path) -> AppResult<Vec<String>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::file_not_found(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let pages = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        parse_toml_pages(&content, &path.display().to_string())?
    } else {
        split_page_breaks(&content)
    };

    tracing::info!(
        "成功加载 {} 页: {}",
        pages.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(pages)
}

/// 解析 TOML 格式的逐页文本
pub fn parse_toml_pages(content: &str, path: &str) -> AppResult<Vec<String>> {
    let document: PagesDocument = toml::from_str(content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: path.to_string(),
            source: Box::new(e),
        })
    })?;
    Ok(document.pages)
}

/// 按换页符切分纯文本
///
/// 末尾换页符产生的最后一个空块会被去掉，其余空块保留为空白页。
pub fn split_page_breaks(content: &str) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut pages: Vec<String> = content.split(PAGE_BREAK).map(str::to_string).collect();
    if content.ends_with(PAGE_BREAK) {
        pages.pop();
    }
    pages
}
