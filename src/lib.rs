//! # Exam Extract
//!
//! 把扫描 / 打印的作文批改页面还原为每位学生一条结构化记录，
//! 并在评分前修复"我的原文"与"更多表达"之间放错位置的内容。
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 身份键、单页解析结果、学生记录、带原因的查找结果
//! - `models/loaders` - 逐页文本加载（换页符分隔的文本 / TOML）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数式的单一能力，不会失败
//! - `text_normalizer` - 统一换行与空白
//! - `HeaderParser` - 页首身份信息与得分
//! - `SectionSplitter` - 四个段落的切分
//! - `reconcile` - 两个字段之间的移动与补标签
//!
//! ### ③ 流程层（Workflow）
//! - `PageFlow` - "一页"的完整解析流程
//! - `StudentAggregator` - 跨页聚合，唯一持有身份键 → 记录映射
//!
//! ### ④ 基础设施层（Infrastructure）
//! - `table_store` - CSV 记录表的读写
//! - `json_export` - 交给评分服务的 JSON
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 抽取 → 修复 两遍处理
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{IdentityKey, KeyResolution, Lookup, PageParse, SectionKind, StudentRecord};
pub use orchestrator::{App, RunMode, RunReport};
pub use services::{normalize_text, reconcile, HeaderParser, SectionSplitter};
pub use workflow::{aggregate_pages, PageFlow, StudentAggregator};
