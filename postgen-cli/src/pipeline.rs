// ABOUTME: End-to-end post generation pipeline from topic to Word documents
// ABOUTME: Orchestrates keyword extraction, reference search, drafting, translation, rendering

use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

use postgen_sdk::{BlogSearchClient, ChatClient, DraftRequest};

use crate::catalog::{PromptCatalog, Tone};
use crate::progress::CliOutput;
use crate::renderer::{self, ImagePool};

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub topic: String,
    pub tone: Tone,
    pub format_key: String,
    /// First entry is the drafting language; the rest are translation targets
    pub languages: Vec<String>,
    pub example_text: Option<String>,
    pub images: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GeneratedPost {
    pub language: String,
    pub text: String,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub keyword: String,
    pub references: String,
    pub posts: Vec<GeneratedPost>,
    pub pool: ImagePool,
}

pub struct Pipeline<'a> {
    chat: &'a ChatClient,
    search: &'a BlogSearchClient,
    catalog: &'a PromptCatalog,
    out: &'a CliOutput,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        chat: &'a ChatClient,
        search: &'a BlogSearchClient,
        catalog: &'a PromptCatalog,
        out: &'a CliOutput,
    ) -> Self {
        Self {
            chat,
            search,
            catalog,
            out,
        }
    }

    pub async fn run(&self, request: &GenerateRequest) -> Result<PipelineOutcome> {
        let format = self.catalog.format(&request.format_key).ok_or_else(|| {
            anyhow!(
                "Unknown format '{}'. Available: {}",
                request.format_key,
                self.catalog.format_names().collect::<Vec<_>>().join(", ")
            )
        })?;

        let (pool, image_names) = load_image_pool(&request.images, self.out)?;
        if image_names.is_empty() {
            self.out.status("📷", "No images uploaded");
        } else {
            for name in &image_names {
                self.out.status("📷", &format!("Loaded image {}", name));
            }
        }

        let primary = request
            .languages
            .first()
            .cloned()
            .unwrap_or_else(|| "한국어".to_string());

        let spinner = self.out.spinner("Extracting keywords...");
        let keyword = self
            .chat
            .extract_keywords(self.catalog.keyword_prompt(), &request.topic, &primary)
            .await;
        spinner.finish_and_clear();
        let keyword = keyword.context("Keyword extraction failed")?;
        self.out
            .status("🔑", &format!("Extracted keywords: {}", keyword));

        let spinner = self.out.spinner("Collecting reference material...");
        let references = self.search.reference_digest(&keyword).await;
        spinner.finish_and_clear();
        self.out.status("📚", "Reference material collected");

        let spinner = self.out.spinner("Drafting post...");
        let draft = self
            .chat
            .draft_post(&DraftRequest {
                system_prompt: self.catalog.writer_prompt(),
                format,
                tone: Some(request.tone.as_str()),
                language: &primary,
                topic: &request.topic,
                references: &references,
                image_names: &image_names,
                example_text: request.example_text.as_deref(),
            })
            .await;
        spinner.finish_and_clear();
        let draft = draft.context("Post drafting failed")?;
        self.out.status("✨", &format!("Drafted post ({})", primary));

        let mut posts = vec![GeneratedPost {
            language: primary,
            text: draft.clone(),
        }];
        for language in request.languages.iter().skip(1) {
            let spinner = self.out.spinner(&format!("Translating into {}...", language));
            let translated = self.chat.translate(&draft, language).await;
            spinner.finish_and_clear();
            let translated =
                translated.with_context(|| format!("Translation into {} failed", language))?;
            posts.push(GeneratedPost {
                language: language.clone(),
                text: translated,
            });
            self.out
                .status("🌐", &format!("Translated into {}", language));
        }

        Ok(PipelineOutcome {
            keyword,
            references,
            posts,
            pool,
        })
    }
}

/// Read image files into a pool keyed by file name, keeping the upload order
/// for the drafting prompt. Files that do not decode as images stay in the
/// pool; the renderer degrades them to the cannot-embed fallback if the model
/// actually references them.
pub fn load_image_pool(paths: &[PathBuf], out: &CliOutput) -> Result<(ImagePool, Vec<String>)> {
    let mut pool = ImagePool::new();
    let mut names = Vec::new();

    for path in paths {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Image path has no usable file name: {}", path.display()))?;

        if image::load_from_memory(&bytes).is_err() {
            out.warning(&format!(
                "'{}' is not a decodable image; it will fall back to text if referenced",
                name
            ));
        }

        names.push(name.clone());
        pool.insert(name, bytes);
    }

    Ok((pool, names))
}

/// Render every generated post and write `generated_post_<language>.docx`
/// files into the output directory.
pub fn write_docx_outputs(
    outcome: &PipelineOutcome,
    output_dir: &Path,
    out: &CliOutput,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let mut written = Vec::new();
    for post in &outcome.posts {
        let document = renderer::render(&post.text, &outcome.pool);
        let path = output_dir.join(format!("generated_post_{}.docx", post.language));
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        document
            .write_docx(file)
            .with_context(|| format!("Failed to serialize document: {}", path.display()))?;
        out.success(&format!("Wrote {}", path.display()));
        written.push(path);
    }

    Ok(written)
}
