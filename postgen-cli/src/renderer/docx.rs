// ABOUTME: Serialization of rendered documents to the Word .docx format
// ABOUTME: Maps block styles, styled runs, rules, and embedded pictures onto OOXML

use std::io::{Cursor, Seek, Write};

use docx_rs::{
    AlignmentType, Docx, DocxError, Paragraph as DocxParagraph, ParagraphBorder,
    ParagraphBorderPosition, ParagraphBorders, Pic, Run as DocxRun, RunFonts, Style, StyleType,
};
use thiserror::Error;

use super::{Block, BlockStyle, Document, Paragraph, Picture, Run, RunStyle};

/// Monospace face for code runs
const MONO_FONT: &str = "Courier New";
/// 10pt, expressed in half-points
const CODE_SIZE: usize = 20;
/// Hyperlink and image-reference run color
const LINK_COLOR: &str = "0000FF";
/// Embedded pictures render 5 inches wide (914400 EMU per inch)
const PICTURE_WIDTH_EMU: u32 = 5 * 914_400;

/// The renderer itself never fails; serializing the finished document is the
/// one hard failure surface and is propagated to the caller.
#[derive(Debug, Error)]
#[error("failed to serialize document: {0}")]
pub struct DocxWriteError(#[from] DocxError);

impl Document {
    /// Serialize to .docx. Persistence is the caller's responsibility; this
    /// writes to whatever `Write + Seek` target it is handed.
    pub fn write_docx<W: Write + Seek>(&self, writer: W) -> Result<(), DocxWriteError> {
        build_docx(self).build().pack(writer).map_err(DocxError::from)?;
        Ok(())
    }

    /// Serialize to an in-memory .docx buffer.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>, DocxWriteError> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_docx(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}

fn build_docx(document: &Document) -> Docx {
    let mut docx = base_styles(Docx::new());
    for block in document.blocks() {
        docx = match block {
            Block::Picture(picture) => docx.add_paragraph(picture_paragraph(picture)),
            Block::Paragraph(paragraph) => docx.add_paragraph(docx_paragraph(paragraph)),
        };
    }
    docx
}

fn base_styles(docx: Docx) -> Docx {
    let heading_sizes: [usize; 6] = [32, 28, 26, 24, 22, 20];
    let mut docx = docx;
    for (index, size) in heading_sizes.iter().enumerate() {
        let level = index + 1;
        docx = docx.add_style(
            Style::new(format!("Heading{}", level), StyleType::Paragraph)
                .name(format!("Heading {}", level))
                .bold()
                .size(*size),
        );
    }
    docx.add_style(Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"))
        .add_style(Style::new("ListNumber", StyleType::Paragraph).name("List Number"))
        .add_style(
            Style::new("Quote", StyleType::Paragraph)
                .name("Quote")
                .italic(),
        )
}

fn docx_paragraph(paragraph: &Paragraph) -> DocxParagraph {
    let mut out = DocxParagraph::new();
    match paragraph.style {
        BlockStyle::Heading(level) => {
            out = out
                .style(&format!("Heading{}", level))
                .align(AlignmentType::Center);
        }
        BlockStyle::Bullet => out = out.style("ListBullet"),
        BlockStyle::Numbered => out = out.style("ListNumber"),
        BlockStyle::Quote => out = out.style("Quote"),
        BlockStyle::Rule => {
            // A rule is a bottom border on an empty paragraph; no runs.
            return out.set_borders(ParagraphBorders::with_empty().set(
                ParagraphBorder::new(ParagraphBorderPosition::Bottom)
                    .size(6)
                    .color("auto"),
            ));
        }
        BlockStyle::Body | BlockStyle::CodeLine => {}
    }

    for run in &paragraph.runs {
        out = out.add_run(docx_run(run));
    }
    out
}

fn docx_run(run: &Run) -> DocxRun {
    let out = DocxRun::new().add_text(run.text.as_str());
    match run.style {
        RunStyle::Plain => out,
        RunStyle::Bold => out.bold(),
        RunStyle::Italic => out.italic(),
        RunStyle::BoldItalic => out.bold().italic(),
        RunStyle::Strike => out.strike(),
        RunStyle::Code => out.fonts(RunFonts::new().ascii(MONO_FONT)).size(CODE_SIZE),
        RunStyle::Link => out.color(LINK_COLOR).underline("single"),
    }
}

fn picture_paragraph(picture: &Picture) -> DocxParagraph {
    let (width, height) = picture.dimensions();
    let (w_emu, h_emu) = scaled_emu(width, height);
    let pic = Pic::new(picture.bytes()).size(w_emu, h_emu);
    DocxParagraph::new().add_run(DocxRun::new().add_image(pic))
}

/// Fixed 5-inch width, aspect ratio preserved.
fn scaled_emu(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (PICTURE_WIDTH_EMU, PICTURE_WIDTH_EMU);
    }
    let scaled_height = (PICTURE_WIDTH_EMU as u64 * height as u64 / width as u64) as u32;
    (PICTURE_WIDTH_EMU, scaled_height)
}
