//! 我的原文 / 更多表达 修复 - 业务能力层
//!
//! 抽取时，本应属于"更多表达"的一行有时会落在"我的原文"末尾，
//! 其标签也会与内容分离，只留下以冒号开头的一行。这里把这类行移回
//! "更多表达"，并根据上下文补上标签。
//!
//! 只处理这两个字段，行内其他内容不做任何改动。

use crate::models::SectionKind;
use crate::services::text_normalizer::non_empty_lines;

/// 半角与全角冒号
const COLONS: &[char] = &[':', '：'];

/// 单条记录的修复结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub mine: String,
    pub more: String,
    /// 第一步是否移动了行
    pub relocation: Relocation,
    /// 第二步补上标签的行数
    pub labeled: usize,
}

impl Reconciled {
    /// 是否对输入做了任何修改（仅规范化空白不算）
    pub fn changed(&self) -> bool {
        self.relocation != Relocation::Unchanged || self.labeled > 0
    }
}

/// 第一步（移动）的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// 条件不满足，未移动
    Unchanged,
    /// 插入到"更多表达"第一条冒号行之前，两行都已带标签
    Inserted { at: usize },
    /// 找不到目标行，未加标签直接追加到末尾
    Appended,
}

/// 去掉前导空白后以冒号开头
pub fn is_colon_leading(line: &str) -> bool {
    line.trim_start().starts_with(COLONS)
}

/// 去掉前导空白后以某个字段名加冒号开头
pub fn is_labeled(line: &str) -> bool {
    [SectionKind::Mine, SectionKind::More]
        .iter()
        .any(|kind| has_label(line, *kind))
}

fn has_label(line: &str, kind: SectionKind) -> bool {
    line.trim_start()
        .strip_prefix(kind.title())
        .is_some_and(|rest| rest.starts_with(COLONS))
}

/// 去掉前导空白后的前四个字符
pub fn leading_four_chars(line: &str) -> String {
    line.trim_start().chars().take(4).collect()
}

/// 在第一个冒号前插入字段名，保留前导空白和冒号及其后的内容
///
/// 不以冒号开头的行原样返回。
pub fn prefix_before_colon(line: &str, kind: SectionKind) -> String {
    let body = line.trim_start();
    if !body.starts_with(COLONS) {
        return line.to_string();
    }
    let indent = &line[..line.len() - body.len()];
    format!("{}{}{}", indent, kind.title(), body)
}

/// 修复一条记录中的两个字段
///
/// 第一步（移动）："更多表达"中存在冒号行，且"我的原文"最后一行也是冒号行时，
/// 把这一行剪切到"更多表达"第一条冒号行之前，并分别补上
/// "我的原文"和"更多表达"标签。
///
/// 第二步（上下文标签）："更多表达"中仍未带标签的冒号行，看上一行的前四个字：
/// 是"我的原文"则补"更多表达"，是"更多表达"则补"我的原文"，其他情况不动。
/// 上一行取的是第二步开始前的内容，补标签不会连锁传递。
///
/// 每次只移动一行。"我的原文"末尾有多条冒号行，且第二步之后"更多表达"
/// 仍留有未带标签的冒号行时，再次运行会继续移动下一行。
pub fn reconcile(mine_text: &str, more_text: &str) -> Reconciled {
    let mut mine_lines = non_empty_lines(mine_text);
    let mut more_lines = non_empty_lines(more_text);

    let relocation = relocate_trailing_line(&mut mine_lines, &mut more_lines);
    let (more_lines, labeled) = label_by_context(&more_lines);

    Reconciled {
        mine: mine_lines.join("\n").trim().to_string(),
        more: more_lines.join("\n").trim().to_string(),
        relocation,
        labeled,
    }
}

fn relocate_trailing_line(mine_lines: &mut Vec<String>, more_lines: &mut Vec<String>) -> Relocation {
    let more_has_colon_line = more_lines.iter().any(|line| is_colon_leading(line));
    let mine_ends_with_colon_line = mine_lines.last().is_some_and(|line| is_colon_leading(line));
    if !more_has_colon_line || !mine_ends_with_colon_line {
        return Relocation::Unchanged;
    }

    let Some(mut cut_line) = mine_lines.pop() else {
        return Relocation::Unchanged;
    };

    let Some(target) = more_lines.iter().position(|line| is_colon_leading(line)) else {
        more_lines.push(cut_line);
        return Relocation::Appended;
    };

    if !is_labeled(&cut_line) {
        cut_line = prefix_before_colon(&cut_line, SectionKind::Mine);
    }
    if !is_labeled(&more_lines[target]) {
        more_lines[target] = prefix_before_colon(&more_lines[target], SectionKind::More);
    }
    more_lines.insert(target, cut_line);

    Relocation::Inserted { at: target }
}

fn label_by_context(more_lines: &[String]) -> (Vec<String>, usize) {
    let mut labeled = 0;
    let updated = more_lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if !is_colon_leading(line) || is_labeled(line) || idx == 0 {
                return line.clone();
            }
            let head = leading_four_chars(&more_lines[idx - 1]);
            let label = if head == SectionKind::Mine.title() {
                SectionKind::More
            } else if head == SectionKind::More.title() {
                SectionKind::Mine
            } else {
                return line.clone();
            };
            labeled += 1;
            prefix_before_colon(line, label)
        })
        .collect();
    (updated, labeled)
}
