//! 页面处理上下文
//!
//! 封装"我正在处理第几页"这一信息，只用于日志

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone, Copy)]
pub struct PageCtx {
    /// 页码（从1开始）
    pub page_index: usize,

    /// 总页数
    pub total_pages: usize,
}

impl PageCtx {
    /// 创建新的页面上下文
    pub fn new(page_index: usize, total_pages: usize) -> Self {
        Self {
            page_index,
            total_pages,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[第 {}/{} 页]", self.page_index, self.total_pages)
    }
}
