// ABOUTME: Image placeholder scanning and resolution against the image pool
// ABOUTME: Handles the four placeholder surface forms and the fallback messages

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{ImagePool, Picture};

static BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.+?\.(?:png|jpg|jpeg))\}").unwrap());
static PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((.+?\.(?:png|jpg|jpeg))\)").unwrap());
static MARKDOWN_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[.*?\]\((.+?\.(?:png|jpg|jpeg))\)").unwrap());
static ALT_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[(.*?)\]").unwrap());

/// The four surface forms, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaceholderForm {
    /// `{name.ext}`
    Brace,
    /// `(name.ext)`
    Paren,
    /// `![alt](name.ext)`
    MarkdownImage,
    /// `![alt]` — the identifier is synthesized as `alt + ".png"`; any other
    /// extension will not resolve through this form
    AltOnly,
}

impl PlaceholderForm {
    const ALL: [PlaceholderForm; 4] = [
        PlaceholderForm::Brace,
        PlaceholderForm::Paren,
        PlaceholderForm::MarkdownImage,
        PlaceholderForm::AltOnly,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            PlaceholderForm::Brace => &BRACE,
            PlaceholderForm::Paren => &PAREN,
            PlaceholderForm::MarkdownImage => &MARKDOWN_IMAGE,
            PlaceholderForm::AltOnly => &ALT_ONLY,
        }
    }

    fn identifier(&self, caps: &Captures<'_>) -> String {
        match self {
            PlaceholderForm::AltOnly => format!("{}.png", &caps[1]),
            _ => caps[1].to_string(),
        }
    }
}

/// User-visible fallback for a placeholder whose identifier is not in the pool.
pub fn not_found_message(name: &str) -> String {
    format!("[이미지 '{}'를 찾을 수 없습니다]", name)
}

/// User-visible fallback for pool bytes that cannot be decoded as an image.
pub fn cannot_embed_message(name: &str) -> String {
    format!("[이미지 '{}'를 삽입할 수 없습니다]", name)
}

pub(super) struct ResolvedLine {
    pub text: String,
    pub pictures: Vec<Picture>,
}

/// Resolve every placeholder on one line, before any block classification.
///
/// A pool hit deletes the placeholder substring and queues the picture for
/// embedding ahead of the line's paragraph; a miss or decode failure replaces
/// the placeholder substring with the bracketed fallback message.
pub(super) fn resolve_line(line: &str, pool: &ImagePool) -> ResolvedLine {
    let mut text = line.to_string();
    let mut pictures = Vec::new();

    for form in PlaceholderForm::ALL {
        text = apply_form(form, &text, pool, &mut pictures);
    }

    ResolvedLine { text, pictures }
}

fn apply_form(
    form: PlaceholderForm,
    text: &str,
    pool: &ImagePool,
    pictures: &mut Vec<Picture>,
) -> String {
    let regex = form.regex();
    if !regex.is_match(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in regex.captures_iter(text) {
        let whole = caps.get(0).expect("capture group 0 always present");
        let name = form.identifier(&caps);
        out.push_str(&text[last..whole.start()]);

        match pool.get(&name) {
            Some(bytes) => match Picture::try_decode(name.clone(), bytes) {
                Ok(picture) => pictures.push(picture),
                Err(error) => {
                    log::warn!("image '{}' in pool but not decodable: {}", name, error);
                    out.push_str(&cannot_embed_message(&name));
                }
            },
            None => {
                log::debug!("image placeholder '{}' not in pool", name);
                out.push_str(&not_found_message(&name));
            }
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}
