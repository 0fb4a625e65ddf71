// ABOUTME: Inline-markup tokenizer producing styled runs from line content
// ABOUTME: Single ordered-alternation pattern; unmatched spans degrade to plain text

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Run, RunStyle};

// Alternatives are ordered longest-and-leftmost-first; the regex engine's
// leftmost-first alternation preserves that priority at every position.
static INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\*\*\*.+?\*\*\*|\*\*.+?\*\*|\*.+?\*|`.+?`|~~.+?~~|!\[.*?\]\(.*?\)|!\[.*?\]|\[.+?\]\(.*?\)",
    )
    .unwrap()
});

/// Split line content into styled runs. Text between matches becomes plain
/// runs; every matched token becomes exactly one styled run.
pub(super) fn tokenize(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut last = 0;

    for token in INLINE.find_iter(text) {
        if token.start() > last {
            runs.push(Run::plain(&text[last..token.start()]));
        }
        runs.push(styled_run(token.as_str()));
        last = token.end();
    }
    if last < text.len() {
        runs.push(Run::plain(&text[last..]));
    }

    runs
}

fn styled_run(token: &str) -> Run {
    if token.starts_with("***") && token.ends_with("***") {
        return Run::new(strip_delims(token, 3), RunStyle::BoldItalic);
    }
    if token.starts_with("**") && token.ends_with("**") {
        return Run::new(strip_delims(token, 2), RunStyle::Bold);
    }
    if token.starts_with('*') && token.ends_with('*') {
        return Run::new(strip_delims(token, 1), RunStyle::Italic);
    }
    if token.starts_with("~~") && token.ends_with("~~") {
        return Run::new(strip_delims(token, 2), RunStyle::Strike);
    }
    if token.starts_with('`') && token.ends_with('`') {
        return Run::new(strip_delims(token, 1), RunStyle::Code);
    }
    if token.starts_with("![") && token.ends_with(')') {
        // Any image syntax still present here referenced something the
        // placeholder pass could not treat as a pool image; render it as a
        // link-like textual reference.
        if let Some(alt_end) = token.find("](") {
            let alt = &token[2..alt_end];
            return Run::new(format!("[이미지: {}]", alt), RunStyle::Link);
        }
    }
    if token.starts_with("![") && token.ends_with(']') {
        let alt = &token[2..token.len() - 1];
        return Run::new(format!("[이미지: {}]", alt), RunStyle::Link);
    }
    if token.starts_with('[') && token.ends_with(')') {
        if let (Some(text_end), Some(url_sep)) = (token.find(']'), token.find("](")) {
            let link_text = &token[1..text_end];
            let url = &token[url_sep + 2..token.len() - 1];
            return Run::new(format!("{} ({})", link_text, url), RunStyle::Link);
        }
    }

    Run::plain(token)
}

/// Python-style symmetric slice: delimiters shorter than expected collapse to
/// an empty span instead of panicking (a lone `***` tokenizes as italic `*`
/// in the alternation but classifies as bold-italic by its affixes).
fn strip_delims(token: &str, n: usize) -> &str {
    token.get(n..token.len().saturating_sub(n)).unwrap_or("")
}
