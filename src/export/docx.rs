/*!
 * DOCX serialization of a `Document` using docx-rs.
 */

use std::fs::File;
use std::path::Path;

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, LineSpacing,
    NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, RunFonts,
    SpecialIndentType, Start,
};

use crate::document::{Alignment, BlockKind, BlockStyle, Document, DocumentBlock};
use crate::errors::ExportError;

/// Numbering definition shared by every bullet item
const BULLET_NUMBERING_ID: usize = 1;

/// Narrow margins keep the résumé on one page (twips)
const PAGE_MARGIN: i32 = 720;

const TWIPS_PER_POINT: u32 = 20;

/// Build the in-memory DOCX package for `document`
pub fn render_docx(document: &Document) -> Docx {
    let bullets = AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(Some(360), Some(SpecialIndentType::Hanging(180)), None, None),
    );

    let docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN)
                .right(PAGE_MARGIN),
        )
        .add_abstract_numbering(bullets)
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    document
        .blocks
        .iter()
        .fold(docx, |docx, block| docx.add_paragraph(render_block(block)))
}

/// Write `document` as a DOCX file at `path`
pub fn write_docx(document: &Document, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    render_docx(document)
        .build()
        .pack(file)
        .map_err(|e| ExportError::Docx(e.to_string()))
}

fn render_block(block: &DocumentBlock) -> Paragraph {
    let paragraph = Paragraph::new()
        .add_run(render_run(&block.text, &block.style))
        .align(alignment(block.style.alignment))
        .line_spacing(
            LineSpacing::new()
                .before(u32::from(block.style.spacing_before) * TWIPS_PER_POINT)
                .after(u32::from(block.style.spacing_after) * TWIPS_PER_POINT),
        );

    match block.kind {
        BlockKind::BulletItem => paragraph.numbering(
            NumberingId::new(BULLET_NUMBERING_ID),
            IndentLevel::new(0),
        ),
        BlockKind::Title | BlockKind::Heading { .. } | BlockKind::Paragraph => paragraph,
    }
}

fn render_run(text: &str, style: &BlockStyle) -> Run {
    let font = style.font_family.as_str();
    let run = Run::new()
        .add_text(text)
        // docx sizes are half-points
        .size(usize::from(style.point_size) * 2)
        .fonts(RunFonts::new().ascii(font).hi_ansi(font).cs(font).east_asia(font));

    if style.bold { run.bold() } else { run }
}

fn alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
    }
}
