// ABOUTME: This module handles output formatting for search results and the format catalog
// ABOUTME: It provides table formatting with color support and JSON formatting

use anyhow::Result;
use owo_colors::OwoColorize;
use postgen_sdk::{BlogSearchItem, strip_bold_tags};
use std::collections::BTreeMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub trait OutputFormat {
    fn format_results(&self, items: &[BlogSearchItem]) -> Result<String>;
    fn format_formats(&self, formats: &BTreeMap<String, String>) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    // Titles are frequently Korean; truncate on char boundaries, not bytes.
    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }

    fn format_blogger(&self, blogger_name: &str) -> String {
        if blogger_name.is_empty() {
            if self.use_color {
                "Unknown".dimmed().to_string()
            } else {
                "Unknown".to_string()
            }
        } else {
            blogger_name.to_string()
        }
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_results(&self, items: &[BlogSearchItem]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(items)?)
        } else {
            Ok(serde_json::to_string(items)?)
        }
    }

    fn format_formats(&self, formats: &BTreeMap<String, String>) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(formats)?)
        } else {
            Ok(serde_json::to_string(formats)?)
        }
    }
}

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Blogger")]
    blogger: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Link")]
    link: String,
}

#[derive(Tabled)]
struct FormatRow {
    #[tabled(rename = "Format")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl OutputFormat for TableFormatter {
    fn format_results(&self, items: &[BlogSearchItem]) -> Result<String> {
        let rows: Vec<ResultRow> = items
            .iter()
            .map(|item| ResultRow {
                title: Self::truncate(&strip_bold_tags(&item.title), 40),
                blogger: self.format_blogger(&item.blogger_name),
                date: item.post_date.clone(),
                link: item.link.clone(),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_formats(&self, formats: &BTreeMap<String, String>) -> Result<String> {
        let rows: Vec<FormatRow> = formats
            .iter()
            .map(|(name, description)| FormatRow {
                name: name.clone(),
                description: Self::truncate(description, 60),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(title: &str, blogger: &str) -> BlogSearchItem {
        BlogSearchItem {
            title: title.to_string(),
            link: "https://blog.example/1".to_string(),
            description: "desc".to_string(),
            blogger_name: blogger.to_string(),
            blogger_link: String::new(),
            post_date: "20240101".to_string(),
        }
    }

    #[test]
    fn test_table_strips_bold_tags() {
        let formatter = TableFormatter::new(false);
        let output = formatter
            .format_results(&[sample_item("<b>제주도</b> 여행", "blogger")])
            .unwrap();
        assert!(output.contains("제주도 여행"));
        assert!(!output.contains("<b>"));
    }

    #[test]
    fn test_table_unknown_blogger() {
        let formatter = TableFormatter::new(false);
        let output = formatter.format_results(&[sample_item("t", "")]).unwrap();
        assert!(output.contains("Unknown"));
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let long_korean = "가".repeat(50);
        let truncated = TableFormatter::truncate(&long_korean, 40);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 40);
    }

    #[test]
    fn test_json_results() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_results(&[sample_item("title", "b")]).unwrap();
        assert!(output.contains("\"title\":\"title\""));
    }

    #[test]
    fn test_json_formats_pretty() {
        let formatter = JsonFormatter::new(true);
        let mut formats = BTreeMap::new();
        formats.insert("naver_blog".to_string(), "desc".to_string());
        let output = formatter.format_formats(&formats).unwrap();
        assert!(output.contains("naver_blog"));
        assert!(output.contains('\n'));
    }
}
