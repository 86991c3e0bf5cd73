//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责按顺序调度两遍处理，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 按运行模式调度抽取与修复
//! - 输出全局统计信息
//!
//! ### `extract_processor` - 抽取
//! - 加载逐页文本
//! - 委托 workflow 聚合
//! - 导出 CSV / JSON
//!
//! ### `reconcile_processor` - 修复
//! - 读回表格
//! - 逐行调用 services::reconcile
//! - 写出到新文件
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (两遍处理)
//!     ↓
//! extract_processor / reconcile_processor
//!     ↓
//! workflow (PageFlow 单页 / StudentAggregator 跨页)
//!     ↓
//! services (能力层：normalize / header / sections / reconcile)
//!     ↓
//! infrastructure (CSV / JSON 文件)
//! ```

pub mod batch_processor;
pub mod extract_processor;
pub mod reconcile_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunMode, RunReport};
pub use extract_processor::{default_exporters, process_extract, ExtractSummary};
pub use reconcile_processor::{process_reconcile, reconcile_table, ReconcileStats};
