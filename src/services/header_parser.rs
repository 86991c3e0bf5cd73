//! 页首信息解析 - 业务能力层
//!
//! 负责从单页文本中取出身份字段与得分。两者的搜索范围不同：
//! 身份信息只在页首几行查找，得分在整页查找。

use crate::error::{AppError, AppResult};
use crate::models::{IdentityKey, Lookup};
use regex::Regex;

/// 页首信息行中的字段标记，按出现顺序排列
const SCHOOL_MARKER: &str = "学校：";
const CLASS_MARKER: &str = "班级：";
const NAME_MARKER: &str = "姓名：";
const ID_MARKER: &str = "学号：";
const TIME_MARKER: &str = "作答时间：";

/// 得分，后面可能跟一个被忽略的全角括号备注
const SCORE_PATTERN: &str = r"得分：(?P<score>\d+)(?:（.*?）)?";

/// 文本搜索范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// 只看前 N 行
    LeadingLines(usize),
    /// 整页
    WholePage,
}

impl SearchScope {
    /// 身份信息默认只看前 3 行，避免误匹配正文中引用的内容
    pub const HEADER: SearchScope = SearchScope::LeadingLines(3);
    /// 得分可能出现在页面任何位置
    pub const SCORE: SearchScope = SearchScope::WholePage;

    /// 截取搜索范围内的文本
    pub fn slice(self, text: &str) -> &str {
        match self {
            SearchScope::WholePage => text,
            SearchScope::LeadingLines(0) => "",
            SearchScope::LeadingLines(count) => match text.match_indices('\n').nth(count - 1) {
                Some((end, _)) => &text[..end],
                None => text,
            },
        }
    }
}

/// 单页页首解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParse {
    pub identity: Lookup<IdentityKey>,
    pub score: Lookup<u32>,
}

impl HeaderParse {
    /// 按对外契约折叠：身份缺失时全部字段为空，得分缺失为 `None`
    pub fn into_parts(self) -> (IdentityKey, Option<u32>) {
        (self.identity.found().unwrap_or_default(), self.score.found())
    }
}

/// 页首信息解析器
pub struct HeaderParser {
    score_re: Regex,
}

impl HeaderParser {
    /// 创建解析器（编译得分匹配模式）
    pub fn new() -> AppResult<Self> {
        let score_re =
            Regex::new(SCORE_PATTERN).map_err(|e| AppError::pattern_invalid(SCORE_PATTERN, e))?;
        Ok(Self { score_re })
    }

    /// 解析一页已规范化的文本
    pub fn parse(&self, page_text: &str) -> HeaderParse {
        HeaderParse {
            identity: parse_identity(page_text, SearchScope::HEADER),
            score: self.parse_score(page_text, SearchScope::SCORE),
        }
    }

    /// 在给定范围内查找第一个 `得分：<数字>`
    ///
    /// 数字超出范围时返回 `Invalid`，绝不折算为 0。
    pub fn parse_score(&self, text: &str, scope: SearchScope) -> Lookup<u32> {
        let Some(caps) = self.score_re.captures(scope.slice(text)) else {
            return Lookup::Missing;
        };
        let raw = &caps["score"];
        match parse_digits(raw) {
            Some(score) => Lookup::Found(score),
            None => Lookup::Invalid(raw.to_string()),
        }
    }
}

/// 把半角或全角数字串转换为数值
///
/// 其他数字字符或溢出时返回 `None`。
fn parse_digits(raw: &str) -> Option<u32> {
    raw.chars().try_fold(0u32, |acc, ch| {
        let digit = match ch {
            '0'..='9' => ch as u32 - '0' as u32,
            '０'..='９' => ch as u32 - '０' as u32,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

/// 在给定范围内查找页首信息行
///
/// 形如 `学校：<学校> 班级：<班级> 姓名：<姓名> 学号：<学号> 作答时间：<时间>`，
/// 字段之间至少有一个空白。每个字段取到下一个标记前的空白为止，
/// 作答时间取到行尾。
///
/// - 范围内没有 `学校：` 标记 → `Missing`
/// - 有标记但后续某个字段标记缺失 → `Invalid`（记录缺失的标记）
pub fn parse_identity(text: &str, scope: SearchScope) -> Lookup<IdentityKey> {
    let block = scope.slice(text);
    let mut outcome = Lookup::Missing;

    for (start, _) in block.match_indices(SCHOOL_MARKER) {
        match parse_identity_fields(&block[start + SCHOOL_MARKER.len()..]) {
            Ok(identity) => return Lookup::Found(identity),
            Err(marker) => outcome = Lookup::Invalid(format!("缺少字段标记 {}", marker)),
        }
    }

    outcome
}

/// 从 `学校：` 之后的文本依次取出五个字段
fn parse_identity_fields(rest: &str) -> Result<IdentityKey, &'static str> {
    let (school, rest) = take_field(rest, CLASS_MARKER).ok_or(CLASS_MARKER)?;
    let (class, rest) = take_field(rest, NAME_MARKER).ok_or(NAME_MARKER)?;
    let (name, rest) = take_field(rest, ID_MARKER).ok_or(ID_MARKER)?;
    let (id, rest) = take_field(rest, TIME_MARKER).ok_or(TIME_MARKER)?;
    let time = rest.split('\n').next().unwrap_or_default();

    Ok(IdentityKey {
        school: school.to_string(),
        class: class.to_string(),
        name: name.to_string(),
        id: id.to_string(),
        time: time.to_string(),
    })
}

/// 取出到 `next_marker` 为止的字段值
///
/// 字段值与标记之间必须有空白（可以跨行），字段值本身不能跨行。
/// 返回 (字段值, 标记之后的文本)。
fn take_field<'a>(text: &'a str, next_marker: &str) -> Option<(&'a str, &'a str)> {
    for (pos, _) in text.match_indices(next_marker) {
        let before = &text[..pos];
        let value = before.trim_end();
        if value.len() == before.len() {
            continue;
        }
        if value.contains('\n') {
            return None;
        }
        return Some((value, &text[pos + next_marker.len()..]));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "学校：第一中学 班级：高一(3)班 姓名：李明 学号：20240315 作答时间：2024-05-01 10:20";

    fn parser() -> HeaderParser {
        HeaderParser::new().unwrap()
    }

    #[test]
    fn test_parse_full_header() {
        let identity = parse_identity(HEADER, SearchScope::HEADER).found().unwrap();
        assert_eq!(identity.school, "第一中学");
        assert_eq!(identity.class, "高一(3)班");
        assert_eq!(identity.name, "李明");
        assert_eq!(identity.id, "20240315");
        assert_eq!(identity.time, "2024-05-01 10:20");
    }

    #[test]
    fn test_field_values_may_contain_spaces() {
        let line = "学校：北京 第一中学   班级：高一 3班 姓名：李 明 学号：001 作答时间：上午";
        let identity = parse_identity(line, SearchScope::WholePage).found().unwrap();
        assert_eq!(identity.school, "北京 第一中学");
        assert_eq!(identity.class, "高一 3班");
        assert_eq!(identity.name, "李 明");
    }

    #[test]
    fn test_empty_field_value() {
        let line = "学校： 班级：高一 姓名：李明 学号：001 作答时间：";
        let identity = parse_identity(line, SearchScope::WholePage).found().unwrap();
        assert_eq!(identity.school, "");
        assert_eq!(identity.time, "");
    }

    #[test]
    fn test_header_only_searched_in_leading_lines() {
        let page = format!("标题\n副标题\n说明\n{}", HEADER);
        assert_eq!(parse_identity(&page, SearchScope::HEADER), Lookup::Missing);
        assert!(parse_identity(&page, SearchScope::WholePage).is_found());

        let page = format!("标题\n副标题\n{}\n正文", HEADER);
        assert!(parse_identity(&page, SearchScope::HEADER).is_found());
    }

    #[test]
    fn test_missing_marker_reported() {
        let line = "学校：第一中学 班级：高一 姓名：李明 作答时间：上午";
        assert_eq!(
            parse_identity(line, SearchScope::HEADER),
            Lookup::Invalid(format!("缺少字段标记 {}", ID_MARKER))
        );
    }

    #[test]
    fn test_marker_requires_preceding_whitespace() {
        let line = "学校：第一中学班级：高一 姓名：李明 学号：001 作答时间：上午";
        assert!(matches!(
            parse_identity(line, SearchScope::HEADER),
            Lookup::Invalid(_)
        ));
    }

    #[test]
    fn test_time_stops_at_line_end() {
        let page = format!("{}\n我的原文\n正文", HEADER);
        let identity = parse_identity(&page, SearchScope::HEADER).found().unwrap();
        assert_eq!(identity.time, "2024-05-01 10:20");
    }

    #[test]
    fn test_score_anywhere_on_page() {
        let page = format!("{}\n我的原文\n正文\n\n\n\n得分：85（满分100）", HEADER);
        assert_eq!(parser().parse_score(&page, SearchScope::SCORE), Lookup::Found(85));
    }

    #[test]
    fn test_score_zero_is_not_missing() {
        assert_eq!(
            parser().parse_score("得分：0", SearchScope::SCORE),
            Lookup::Found(0)
        );
        assert_eq!(
            parser().parse_score("得分：待定", SearchScope::SCORE),
            Lookup::Missing
        );
    }

    #[test]
    fn test_full_width_score() {
        assert_eq!(
            parser().parse_score("学校：一中\n得分：８５（良）", SearchScope::WholePage),
            Lookup::Found(85)
        );
        assert_eq!(
            parser().parse_score("得分：9０", SearchScope::SCORE),
            Lookup::Found(90)
        );
    }

    #[test]
    fn test_other_digit_scripts_are_invalid() {
        assert_eq!(
            parser().parse_score("得分：٨٥", SearchScope::SCORE),
            Lookup::Invalid("٨٥".to_string())
        );
    }

    #[test]
    fn test_score_overflow_is_invalid() {
        assert_eq!(
            parser().parse_score("得分：99999999999", SearchScope::SCORE),
            Lookup::Invalid("99999999999".to_string())
        );
    }

    #[test]
    fn test_parse_collapses_to_defaults() {
        let (identity, score) = parser().parse("没有页首的一页").into_parts();
        assert!(identity.is_empty());
        assert_eq!(score, None);
    }

    #[test]
    fn test_scope_slice() {
        let text = "一\n二\n三\n四";
        assert_eq!(SearchScope::LeadingLines(3).slice(text), "一\n二\n三");
        assert_eq!(SearchScope::LeadingLines(9).slice(text), text);
        assert_eq!(SearchScope::LeadingLines(0).slice(text), "");
        assert_eq!(SearchScope::WholePage.slice(text), text);
    }
}
