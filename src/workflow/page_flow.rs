//! 单页处理流程 - 流程层
//!
//! 核心职责：定义"一页"的完整解析流程
//!
//! 流程顺序：
//! 1. 规范化文本
//! 2. 解析页首（身份 + 得分）
//! 3. 判定页面归属（完整键 / 宽松键 / 无法归属）
//! 4. 切分段落

use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::{KeyResolution, Lookup, PageParse};
use crate::services::{normalize_text, HeaderParser, SectionSplitter, SplitResult};
use crate::workflow::page_ctx::PageCtx;

/// 单页处理结果
///
/// 保留每一步的判定原因，`parse` 是按对外契约折叠后的值。
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub resolution: KeyResolution,
    pub score: Lookup<u32>,
    pub split: SplitResult,
    pub parse: PageParse,
}

impl PageOutcome {
    /// 页面是否能归属到某位学生
    pub fn is_attributed(&self) -> bool {
        self.resolution.key().is_some()
    }
}

/// 单页处理流程
///
/// - 只组合解析能力，不持有跨页状态
/// - 不同页之间互不依赖
pub struct PageFlow {
    header_parser: HeaderParser,
    section_splitter: SectionSplitter,
}

impl PageFlow {
    /// 创建新的单页流程
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            header_parser: HeaderParser::new()?,
            section_splitter: SectionSplitter::new()?,
        })
    }

    pub fn run(&self, raw_text: &str, ctx: &PageCtx) -> PageOutcome {
        let text = normalize_text(raw_text);

        let header = self.header_parser.parse(&text);
        match &header.identity {
            Lookup::Found(_) => {}
            Lookup::Missing => debug!("{} 前 3 行未找到页首信息", ctx),
            Lookup::Invalid(reason) => warn!("{} ⚠️ 页首信息不完整: {}", ctx, reason),
        }
        if let Lookup::Invalid(raw) = &header.score {
            warn!("{} ⚠️ 得分无法解析: {}", ctx, raw);
        }

        let score = header.score.clone();
        let (identity, score_value) = header.into_parts();
        let resolution = KeyResolution::resolve(identity.clone());

        let split = self.section_splitter.split(&text);
        if split.has_no_titles() {
            debug!("{} 未找到任何段落标题", ctx);
        }

        let parse = PageParse {
            identity,
            score: score_value,
            sections: split.sections.clone(),
        };

        PageOutcome {
            resolution,
            score,
            split,
            parse,
        }
    }
}
