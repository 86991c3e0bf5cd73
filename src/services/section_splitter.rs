//! 段落切分 - 业务能力层
//!
//! 从单页文本中按"我的原文 / 语法错误 / 单句点评 / 更多表达"切分段落。
//! 允许段落缺失：一段内容可能跨页，某一页只含其中几段是正常情况。

use crate::error::{AppError, AppResult};
use crate::models::{SectionKind, Sections};
use regex::Regex;

/// 页尾页码标记，如 `第 1 页 / 共 3 页`
const PAGE_FOOTER_PATTERN: &str = r"第\s*\d+\s*页\s*/\s*共\s*\d+\s*页";

/// 单页切分结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitResult {
    pub sections: Sections,
    /// 本页找到的标题，按页面中的出现顺序
    pub found: Vec<SectionKind>,
    /// 是否截掉了页尾标记及其后的内容
    pub footer_trimmed: bool,
}

impl SplitResult {
    /// 本页一个标题都没有
    pub fn has_no_titles(&self) -> bool {
        self.found.is_empty()
    }
}

/// 段落切分器
pub struct SectionSplitter {
    footer_re: Regex,
}

impl SectionSplitter {
    /// 创建切分器（编译页尾匹配模式）
    pub fn new() -> AppResult<Self> {
        let footer_re = Regex::new(PAGE_FOOTER_PATTERN)
            .map_err(|e| AppError::pattern_invalid(PAGE_FOOTER_PATTERN, e))?;
        Ok(Self { footer_re })
    }

    /// 切分一页已规范化的文本
    ///
    /// 1. 截掉页尾标记及其后的内容
    /// 2. 找到每个标题在行首的第一次出现
    /// 3. 按出现位置排序，相邻两个标题之间就是前一个标题的段落
    /// 4. 去掉段落开头的标题文字
    ///
    /// 一个标题都找不到时四段全部为空，不把整页当作某一段。
    pub fn split(&self, page_text: &str) -> SplitResult {
        let (text, footer_trimmed) = self.trim_footer(page_text);

        let mut positions: Vec<(SectionKind, usize)> = SectionKind::ALL
            .iter()
            .filter_map(|kind| find_title(text, kind.title()).map(|pos| (*kind, pos)))
            .collect();
        positions.sort_by_key(|(_, pos)| *pos);

        let mut result = SplitResult {
            footer_trimmed,
            ..Default::default()
        };

        for (i, (kind, start)) in positions.iter().enumerate() {
            let end = positions.get(i + 1).map_or(text.len(), |(_, next)| *next);
            let block = text[*start..end].trim();
            let body = block.strip_prefix(kind.title()).unwrap_or(block).trim();
            *result.sections.get_mut(*kind) = body.to_string();
            result.found.push(*kind);
        }

        result
    }

    /// 截掉页尾标记及其后的内容
    pub fn trim_footer<'a>(&self, text: &'a str) -> (&'a str, bool) {
        match self.footer_re.find(text) {
            Some(m) => (text[..m.start()].trim(), true),
            None => (text, false),
        }
    }
}

/// 查找标题在行首的第一次出现，返回字节偏移
pub fn find_title(text: &str, title: &str) -> Option<usize> {
    text.match_indices(title)
        .map(|(pos, _)| pos)
        .find(|&pos| pos == 0 || text[..pos].ends_with('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter() -> SectionSplitter {
        SectionSplitter::new().unwrap()
    }

    #[test]
    fn test_split_all_sections() {
        let page = "学校：一中\n我的原文\n正文第一句\n正文第二句\n语法错误\n错误一\n单句点评\n点评一\n更多表达\n表达一";
        let result = splitter().split(page);
        assert_eq!(result.sections.mine, "正文第一句\n正文第二句");
        assert_eq!(result.sections.errors, "错误一");
        assert_eq!(result.sections.comments, "点评一");
        assert_eq!(result.sections.more, "表达一");
        assert_eq!(result.found, SectionKind::ALL.to_vec());
    }

    #[test]
    fn test_split_sections_out_of_order() {
        let page = "更多表达\n表达一\n我的原文\n正文\n单句点评\n点评\n语法错误\n错误";
        let result = splitter().split(page);
        assert_eq!(result.sections.more, "表达一");
        assert_eq!(result.sections.mine, "正文");
        assert_eq!(result.sections.comments, "点评");
        assert_eq!(result.sections.errors, "错误");
        assert_eq!(
            result.found,
            vec![
                SectionKind::More,
                SectionKind::Mine,
                SectionKind::Comments,
                SectionKind::Errors
            ]
        );

        let rebuilt: Vec<&str> = result
            .found
            .iter()
            .map(|kind| result.sections.get(*kind))
            .collect();
        assert_eq!(rebuilt.join("\n"), "表达一\n正文\n点评\n错误");
    }

    #[test]
    fn test_footer_never_leaks_into_last_section() {
        let page = "我的原文\n正文\n更多表达\n表达一\n第 1 页 / 共 2 页\n页脚杂讯";
        let result = splitter().split(page);
        assert_eq!(result.sections.more, "表达一");
        assert!(result.footer_trimmed);
    }

    #[test]
    fn test_footer_without_spaces() {
        let (text, trimmed) = splitter().trim_footer("内容\n第2页/共3页");
        assert_eq!(text, "内容");
        assert!(trimmed);
    }

    #[test]
    fn test_title_must_start_a_line() {
        let page = "我的原文\n这里提到我的原文不是标题\n语法错误\n无";
        let result = splitter().split(page);
        assert_eq!(result.sections.mine, "这里提到我的原文不是标题");
        assert_eq!(result.sections.errors, "无");
    }

    #[test]
    fn test_title_with_inline_content() {
        let result = splitter().split("我的原文 第一句\n第二句");
        assert_eq!(result.sections.mine, "第一句\n第二句");
    }

    #[test]
    fn test_partial_sections() {
        let result = splitter().split("续页内容\n单句点评\n点评二");
        assert_eq!(result.sections.comments, "点评二");
        assert!(result.sections.mine.is_empty());
        assert!(result.sections.errors.is_empty());
        assert!(result.sections.more.is_empty());
    }

    #[test]
    fn test_no_titles_yields_all_empty() {
        let result = splitter().split("只有一段没有标题的文字\n第二行");
        assert!(result.has_no_titles());
        assert!(result.sections.is_empty());
    }

    #[test]
    fn test_title_only_block_is_empty() {
        let result = splitter().split("我的原文\n语法错误\n错误一");
        assert_eq!(result.sections.mine, "");
        assert_eq!(result.sections.errors, "错误一");
        assert_eq!(result.found.len(), 2);
    }
}
