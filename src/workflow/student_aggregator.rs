//! 跨页聚合 - 流程层
//!
//! 把按顺序排列的逐页解析结果聚合为每位学生一条记录。
//! 页面顺序决定段落文本的拼接顺序，必须按输入顺序逐页处理。

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::models::{IdentityKey, KeyResolution, PageParse, SectionKind, StudentRecord};
use crate::workflow::page_ctx::PageCtx;
use crate::workflow::page_flow::PageFlow;

/// 聚合统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregationStats {
    /// 输入页数
    pub pages: usize,
    /// 无法归属而丢弃的页数
    pub discarded: usize,
    /// 按宽松键（姓名 + 学号）归属的页数
    pub relaxed: usize,
    /// 没有贡献任何段落内容的页数
    pub untitled: usize,
    /// 输出的学生数
    pub students: usize,
}

/// 学生记录表
///
/// 本次运行中唯一持有 身份键 → 记录 映射的所有者；
/// `finish` 消耗自身，把排好序的记录整体交给输出环节。
#[derive(Debug, Default)]
pub struct StudentAggregator {
    index: HashMap<IdentityKey, usize>,
    records: Vec<StudentRecord>,
    stats: AggregationStats,
}

impl StudentAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 并入一页
    ///
    /// 返回 false 表示页面无法归属、已被丢弃。
    pub fn add_page(&mut self, resolution: &KeyResolution, page: PageParse) -> bool {
        self.stats.pages += 1;
        if page.sections.is_empty() {
            self.stats.untitled += 1;
        }

        let key = match resolution {
            KeyResolution::Strict(key) => key,
            KeyResolution::Relaxed(key) => {
                self.stats.relaxed += 1;
                key
            }
            KeyResolution::Unattributable => {
                self.stats.discarded += 1;
                return false;
            }
        };

        let slot = match self.index.get(key).copied() {
            Some(slot) => slot,
            None => {
                self.records.push(StudentRecord::new(key));
                self.index.insert(key.clone(), self.records.len() - 1);
                self.records.len() - 1
            }
        };
        let record = &mut self.records[slot];

        // 先取到的得分为准，之后的空得分不覆盖
        if record.score.is_empty() {
            if let Some(score) = page.score {
                record.score = score.to_string();
            }
        }

        for kind in SectionKind::ALL {
            append_fragment(record.section_mut(kind), page.sections.get(kind));
        }

        true
    }

    /// 结束聚合，按 (班级, 姓名, 学号) 升序输出
    ///
    /// 排序是稳定的，排序键相同的记录保持首次出现的顺序。
    pub fn finish(mut self) -> (Vec<StudentRecord>, AggregationStats) {
        self.records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.stats.students = self.records.len();
        (self.records, self.stats)
    }
}

/// 追加一段跨页文本，只在已有内容时插入换行
fn append_fragment(field: &mut String, fragment: &str) {
    if fragment.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(fragment);
}

/// 逐页解析并聚合
///
/// # 参数
/// - `flow`: 单页流程
/// - `pages`: 按物理顺序排列的逐页文本
///
/// # 返回
/// 排好序的学生记录与统计信息
pub fn aggregate_pages(flow: &PageFlow, pages: &[String]) -> (Vec<StudentRecord>, AggregationStats) {
    let total = pages.len();
    let mut aggregator = StudentAggregator::new();

    for (idx, raw) in pages.iter().enumerate() {
        let ctx = PageCtx::new(idx + 1, total);
        let outcome = flow.run(raw, &ctx);

        match &outcome.resolution {
            KeyResolution::Strict(key) => debug!("{} 归属 {}", ctx, key),
            KeyResolution::Relaxed(key) => {
                warn!("{} ⚠️ 页首信息不全，按姓名+学号归属 {}", ctx, key)
            }
            KeyResolution::Unattributable => {
                warn!("{} ⚠️ 无法确定学生归属，跳过此页", ctx);
            }
        }

        aggregator.add_page(&outcome.resolution, outcome.parse);
    }

    let (records, stats) = aggregator.finish();
    info!(
        "✓ 聚合完成: 共 {} 页, 丢弃 {} 页, 宽松归属 {} 页, 学生 {} 人",
        stats.pages, stats.discarded, stats.relaxed, stats.students
    );
    (records, stats)
}
