//! 文本规范化 - 业务能力层
//!
//! 所有组件在处理原始文本前都先经过这里。

/// 规范化一段原始文本
///
/// - 统一 `\r\n` / `\r` / `\n` 为 `\n`
/// - 去掉每行右侧空白
/// - 去掉整体首尾空白（含首尾空行）
///
/// 对已规范化的文本再次调用不会产生变化。
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// 规范化后按行切分，并丢弃空行
pub fn non_empty_lines(text: &str) -> Vec<String> {
    normalize_text(text)
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_line_endings() {
        assert_eq!(normalize_text("甲\r\n乙\r丙\n丁"), "甲\n乙\n丙\n丁");
    }

    #[test]
    fn test_strip_trailing_whitespace_and_blank_edges() {
        let raw = "\n\n  第一行   \n第二行\t\n\n\n";
        assert_eq!(normalize_text(raw), "第一行\n第二行");
    }

    #[test]
    fn test_keeps_inner_blank_lines() {
        assert_eq!(normalize_text("甲\n   \n乙"), "甲\n\n乙");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\r\n \r\n"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "  学校：一中 \r\n\r\n我的原文\r  正文  \n\n",
            "\u{3000}全角空格\u{3000}\n尾行 ",
            "a\rb\r\nc\n\rd",
        ];
        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "输入: {:?}", sample);
        }
    }

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(non_empty_lines("甲\n\n  \n乙 "), vec!["甲", "乙"]);
        assert!(non_empty_lines("").is_empty());
    }
}
