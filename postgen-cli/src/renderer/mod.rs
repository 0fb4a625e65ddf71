// ABOUTME: Markdown-and-placeholder document renderer producing Word-ready documents
// ABOUTME: Resolves image placeholders against a pool, classifies blocks, styles inline runs

mod block;
mod docx;
mod inline;
mod placeholder;

pub use docx::DocxWriteError;
pub use placeholder::{cannot_embed_message, not_found_message};

use std::collections::HashMap;

/// Images available for embedding, keyed by the uploaded filename
/// (case-sensitive, extension included).
#[derive(Debug, Clone, Default)]
pub struct ImagePool {
    images: HashMap<String, Vec<u8>>,
}

impl ImagePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(name.into(), bytes);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.images.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl FromIterator<(String, Vec<u8>)> for ImagePool {
    fn from_iter<T: IntoIterator<Item = (String, Vec<u8>)>>(iter: T) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

/// Paragraph-level style of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    Body,
    /// Heading level 1-6, center-aligned in the output document
    Heading(u8),
    Bullet,
    Numbered,
    Quote,
    /// Single monospaced line introduced by a code fence
    CodeLine,
    /// Bottom border on an empty paragraph; never carries runs
    Rule,
}

/// Inline style of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    Bold,
    Italic,
    BoldItalic,
    Strike,
    /// Monospace face, fixed 10pt
    Code,
    /// Colored, underlined hyperlink/image-reference text
    Link,
}

/// A contiguous span of text sharing one set of inline style attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunStyle::Plain)
    }
}

/// One paragraph-equivalent unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub style: BlockStyle,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Concatenated text of all runs, markup delimiters already stripped.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A decoded image ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    name: String,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl Picture {
    /// Decode image bytes, keeping the pixel dimensions for later scaling.
    /// Fails on bytes that are not a decodable image.
    pub fn try_decode(name: impl Into<String>, bytes: &[u8]) -> Result<Self, image::ImageError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self {
            name: name.into(),
            bytes: bytes.to_vec(),
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Picture(Picture),
}

/// The rendered document: blocks in input-line order, serializable to .docx.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) => Some(paragraph),
            Block::Picture(_) => None,
        })
    }

    pub fn pictures(&self) -> impl Iterator<Item = &Picture> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Picture(picture) => Some(picture),
            Block::Paragraph(_) => None,
        })
    }
}

/// Render generated post text into a document, embedding pool images where
/// their placeholders occur.
///
/// Never fails: unresolved placeholders and malformed markup degrade to
/// fallback text. Serialization is the caller's concern, via
/// [`Document::write_docx`] or [`Document::to_docx_bytes`].
pub fn render(post_text: &str, image_pool: &ImagePool) -> Document {
    let normalized = post_text.replace("\r\n", "\n").replace('\r', "\n");

    let mut blocks = Vec::new();
    for line in normalized.split('\n') {
        let resolved = placeholder::resolve_line(line, image_pool);
        blocks.extend(resolved.pictures.into_iter().map(Block::Picture));

        // A line that was nothing but resolved placeholders yields no paragraph.
        if resolved.text.trim().is_empty() {
            continue;
        }
        blocks.push(Block::Paragraph(block::classify_line(&resolved.text)));
    }

    Document { blocks }
}
