// ABOUTME: Block-level classification of placeholder-resolved lines
// ABOUTME: Ordered detectors for headings, lists, quotes, rules, and code lines

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline;
use super::{BlockStyle, Paragraph, Run, RunStyle};

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*+-]\s+(.*)$").unwrap());
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").unwrap());
static QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^>\s+(.*)$").unwrap());

/// Classify one non-blank line into a styled paragraph.
///
/// Detectors run top to bottom, first match wins; the order is a contract
/// (a `-` bullet must not shadow a `---` rule and vice versa). Every detector
/// is anchored to line start and evaluated fresh per line.
pub(super) fn classify_line(line: &str) -> Paragraph {
    if let Some(caps) = HEADING.captures(line) {
        let level = caps[1].len() as u8;
        return Paragraph {
            style: BlockStyle::Heading(level),
            runs: inline::tokenize(&caps[2]),
        };
    }

    if let Some(caps) = BULLET.captures(line) {
        return Paragraph {
            style: BlockStyle::Bullet,
            runs: inline::tokenize(&caps[1]),
        };
    }

    if let Some(caps) = NUMBERED.captures(line) {
        return Paragraph {
            style: BlockStyle::Numbered,
            runs: inline::tokenize(&caps[1]),
        };
    }

    if let Some(caps) = QUOTE.captures(line) {
        return Paragraph {
            style: BlockStyle::Quote,
            runs: inline::tokenize(&caps[1]),
        };
    }

    let trimmed = line.trim();
    if trimmed == "***" || trimmed == "---" {
        return Paragraph {
            style: BlockStyle::Rule,
            runs: Vec::new(),
        };
    }

    if let Some(rest) = line.strip_prefix("```") {
        // No inline-markup recursion inside code lines.
        return Paragraph {
            style: BlockStyle::CodeLine,
            runs: vec![Run::new(rest, RunStyle::Code)],
        };
    }

    Paragraph {
        style: BlockStyle::Body,
        runs: inline::tokenize(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let line = format!("{} Title", "#".repeat(level as usize));
            let paragraph = classify_line(&line);
            assert_eq!(paragraph.style, BlockStyle::Heading(level));
            assert_eq!(paragraph.text(), "Title");
        }
    }

    #[test]
    fn test_seven_hashes_is_body() {
        let paragraph = classify_line("####### Too deep");
        assert_eq!(paragraph.style, BlockStyle::Body);
    }

    #[test]
    fn test_hash_without_space_is_body() {
        let paragraph = classify_line("#hashtag");
        assert_eq!(paragraph.style, BlockStyle::Body);
        assert_eq!(paragraph.text(), "#hashtag");
    }

    #[test]
    fn test_bullet_markers() {
        for marker in ["*", "-", "+"] {
            let paragraph = classify_line(&format!("{} item", marker));
            assert_eq!(paragraph.style, BlockStyle::Bullet);
            assert_eq!(paragraph.text(), "item");
        }
    }

    #[test]
    fn test_numbered_item() {
        let paragraph = classify_line("12. twelfth");
        assert_eq!(paragraph.style, BlockStyle::Numbered);
        assert_eq!(paragraph.text(), "twelfth");
    }

    #[test]
    fn test_quote() {
        let paragraph = classify_line("> 인용문");
        assert_eq!(paragraph.style, BlockStyle::Quote);
        assert_eq!(paragraph.text(), "인용문");
    }

    #[test]
    fn test_rule_variants() {
        for line in ["***", "---", "  ***  ", "\t---"] {
            let paragraph = classify_line(line);
            assert_eq!(paragraph.style, BlockStyle::Rule, "line: {:?}", line);
            assert!(paragraph.runs.is_empty());
        }
    }

    #[test]
    fn test_four_dashes_is_not_a_rule() {
        let paragraph = classify_line("----");
        assert_eq!(paragraph.style, BlockStyle::Body);
    }

    #[test]
    fn test_code_line() {
        let paragraph = classify_line("```let x = 1;");
        assert_eq!(paragraph.style, BlockStyle::CodeLine);
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].style, RunStyle::Code);
        assert_eq!(paragraph.runs[0].text, "let x = 1;");
    }

    #[test]
    fn test_code_line_skips_inline_markup() {
        let paragraph = classify_line("```**not bold**");
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].text, "**not bold**");
    }

    #[test]
    fn test_bare_fence_keeps_single_empty_code_run() {
        let paragraph = classify_line("```");
        assert_eq!(paragraph.style, BlockStyle::CodeLine);
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].text, "");
    }

    #[test]
    fn test_body_fallback() {
        let paragraph = classify_line("그냥 본문입니다");
        assert_eq!(paragraph.style, BlockStyle::Body);
    }

    #[test]
    fn test_heading_content_keeps_inline_styles() {
        let paragraph = classify_line("# **Bold Title**");
        assert_eq!(paragraph.style, BlockStyle::Heading(1));
        assert_eq!(paragraph.runs.len(), 1);
        assert_eq!(paragraph.runs[0].style, RunStyle::Bold);
        assert_eq!(paragraph.runs[0].text, "Bold Title");
    }
}
