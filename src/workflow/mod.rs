pub mod page_ctx;
pub mod page_flow;
pub mod student_aggregator;

pub use page_ctx::PageCtx;
pub use page_flow::{PageFlow, PageOutcome};
pub use student_aggregator::{aggregate_pages, AggregationStats, StudentAggregator};
