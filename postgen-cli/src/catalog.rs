// ABOUTME: Immutable prompt catalog: system prompts, tone table, and format catalog
// ABOUTME: Loaded once at startup from built-in defaults plus an optional JSON override

use anyhow::{Context, Result};
use phf::phf_map;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Writing tone passed to the post drafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Formal,
    Casual,
    Humorous,
    Informative,
}

// Numeric menu choices kept alongside the names; the original interface
// offered tones as a 1-4 menu.
static TONE_CHOICES: phf::Map<&'static str, Tone> = phf_map! {
    "1" => Tone::Formal,
    "2" => Tone::Casual,
    "3" => Tone::Humorous,
    "4" => Tone::Informative,
    "formal" => Tone::Formal,
    "casual" => Tone::Casual,
    "humorous" => Tone::Humorous,
    "informative" => Tone::Informative,
};

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Humorous => "humorous",
            Tone::Informative => "informative",
        }
    }

    /// Resolve a menu choice ("1".."4") or a tone name. Unknown input falls
    /// back to casual.
    pub fn from_choice(choice: &str) -> Tone {
        TONE_CHOICES
            .get(choice.trim().to_lowercase().as_str())
            .copied()
            .unwrap_or(Tone::Casual)
    }

    pub fn is_known_choice(choice: &str) -> bool {
        TONE_CHOICES.contains_key(choice.trim().to_lowercase().as_str())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// System prompts and the named format catalog, resolved once at process
/// start and passed by reference to the pipeline. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptCatalog {
    keyword_prompt: String,
    writer_prompt: String,
    formats: BTreeMap<String, String>,
}

pub const DEFAULT_FORMAT: &str = "naver_blog";

#[derive(Debug, Deserialize)]
struct PromptEntry {
    content: String,
}

/// On-disk shape: the original catalog file carried `formats`; the system
/// prompt entries are optional overrides.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    first_sys_prompt: Option<PromptEntry>,
    #[serde(default)]
    second_sys_prompt: Option<PromptEntry>,
    #[serde(default)]
    formats: Option<BTreeMap<String, String>>,
}

impl PromptCatalog {
    pub fn builtin() -> Self {
        let mut formats = BTreeMap::new();
        formats.insert(
            "naver_blog".to_string(),
            "서론, 본론, 결론 구조를 갖춘 네이버 블로그 게시글 형식으로 작성하세요. 소제목을 사용하고 문단은 짧게 유지하세요."
                .to_string(),
        );
        formats.insert(
            "instagram".to_string(),
            "해시태그를 포함한 짧고 감각적인 인스타그램 캡션 형식으로 작성하세요."
                .to_string(),
        );

        Self {
            keyword_prompt:
                "당신은 키워드 추출 전문가입니다. 사용자의 질문에서 핵심 키워드를 추출하세요."
                    .to_string(),
            writer_prompt:
                "당신은 글 작성 전문가입니다. 아래의 정보를 바탕으로 게시글을 작성하세요.\n이미지를 글에 포함시킬 때는 이미지 파일명을 중괄호로 감싸서 {image_filename} 형태로 표시하세요."
                    .to_string(),
            formats,
        }
    }

    /// Builtin catalog with a JSON file merged over it. File formats extend
    /// and override builtin entries key by key.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read prompt catalog: {}",
                path.as_ref().display()
            )
        })?;
        let file: CatalogFile = serde_json::from_str(&content).with_context(|| {
            format!(
                "Failed to parse prompt catalog JSON: {}",
                path.as_ref().display()
            )
        })?;

        Ok(Self::builtin().apply(file))
    }

    fn apply(mut self, file: CatalogFile) -> Self {
        if let Some(entry) = file.first_sys_prompt {
            self.keyword_prompt = entry.content;
        }
        if let Some(entry) = file.second_sys_prompt {
            self.writer_prompt = entry.content;
        }
        if let Some(formats) = file.formats {
            self.formats.extend(formats);
        }
        self
    }

    pub fn keyword_prompt(&self) -> &str {
        &self.keyword_prompt
    }

    pub fn writer_prompt(&self) -> &str {
        &self.writer_prompt
    }

    pub fn format(&self, key: &str) -> Option<&str> {
        self.formats.get(key).map(String::as_str)
    }

    pub fn format_names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn formats(&self) -> &BTreeMap<String, String> {
        &self.formats
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
