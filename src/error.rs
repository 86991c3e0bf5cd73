use std::fmt;

/// 应用程序错误类型
///
/// 解析与修复核心本身不会失败，这里只覆盖文件、表格与配置等外围 I/O。
#[derive(Debug)]
pub enum AppError {
    /// 文件操作错误
    File(FileError),
    /// 表格读写错误
    Table(TableError),
    /// 配置错误
    Config(ConfigError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Table(e) => write!(f, "表格错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::File(e) => Some(e),
            AppError::Table(e) => Some(e),
            AppError::Config(e) => Some(e),
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// 表格读写错误
#[derive(Debug)]
pub enum TableError {
    /// 表头中缺少必需的列
    MissingColumn { column: String },
    /// CSV 读写失败
    CsvFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 序列化失败
    JsonFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 表格为空，缺少表头行
    EmptyTable { path: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MissingColumn { column } => write!(f, "未找到所需列: '{}'", column),
            TableError::CsvFailed { source } => write!(f, "CSV读写失败: {}", source),
            TableError::JsonFailed { source } => write!(f, "JSON序列化失败: {}", source),
            TableError::EmptyTable { path } => write!(f, "表格为空，缺少表头行: {}", path),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::CsvFailed { source } | TableError::JsonFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 命令行参数无效
    InvalidArgument { argument: String },
    /// 内置匹配模式编译失败
    PatternInvalid {
        pattern: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument { argument } => {
                write!(f, "无效的参数: '{}' (可选: extract / reconcile / all)", argument)
            }
            ConfigError::PatternInvalid { pattern, source } => {
                write!(f, "匹配模式 {} 编译失败: {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::PatternInvalid { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ConfigError::InvalidArgument { .. } => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Table(TableError::CsvFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Table(TableError::JsonFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件不存在错误
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AppError::File(FileError::NotFound { path: path.into() })
    }

    /// 创建缺列错误
    pub fn missing_column(column: impl Into<String>) -> Self {
        AppError::Table(TableError::MissingColumn {
            column: column.into(),
        })
    }

    /// 创建匹配模式编译错误
    pub fn pattern_invalid(pattern: impl Into<String>, source: regex::Error) -> Self {
        AppError::Config(ConfigError::PatternInvalid {
            pattern: pattern.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
