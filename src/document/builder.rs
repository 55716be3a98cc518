/*!
 * Conversion of loaded sections into a `Document`.
 *
 * Layout: one Title, then for each section one Heading followed by the blocks
 * parsed from its body. A body that is unavailable or yields no content gets a
 * single placeholder paragraph, so the heading count always equals the
 * section count.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SectionError;
use crate::language_utils::Language;
use crate::sections::{Section, SectionBody};

use super::model::{BlockKind, Document, StyleSheet};

/// Heading level used for section headings (the title sits above them)
pub const SECTION_HEADING_LEVEL: u8 = 2;

/// Block produced from one piece of section body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyBlock {
    Paragraph(String),
    BulletItem(String),
}

/// Builds documents with a fixed header and style sheet
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    full_name: String,
    styles: StyleSheet,
}

impl DocumentBuilder {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            styles: StyleSheet::default(),
        }
    }

    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Lay out `sections` (already in declaration order) as a document
    pub fn build(&self, sections: &[Section], language: Language) -> Document {
        let mut document = Document::new(language);
        document.push(BlockKind::Title, self.full_name.clone(), &self.styles);

        for section in sections {
            document.push(
                BlockKind::Heading { level: SECTION_HEADING_LEVEL },
                section.title.clone(),
                &self.styles,
            );

            let blocks = match &section.body {
                SectionBody::Text(text) => parse_body(text),
                SectionBody::Unavailable(_) => Vec::new(),
            };

            if blocks.is_empty() {
                document.push(BlockKind::Paragraph, placeholder_text(section), &self.styles);
                continue;
            }

            for block in blocks {
                match block {
                    BodyBlock::Paragraph(text) => {
                        document.push(BlockKind::Paragraph, text, &self.styles)
                    }
                    BodyBlock::BulletItem(text) => {
                        document.push(BlockKind::BulletItem, text, &self.styles)
                    }
                }
            }
        }

        document
    }
}

/// Placeholder paragraph naming the resource that could not supply content
pub fn placeholder_text(section: &Section) -> String {
    match &section.body {
        SectionBody::Unavailable(SectionError::ResourceMissing { resource, .. }) => {
            format!("Error: section source not found: {}", resource)
        }
        SectionBody::Unavailable(SectionError::Unreadable { resource, .. }) => {
            format!("Error: section source could not be read: {}", resource)
        }
        SectionBody::Text(_) => format!("Error: section source is empty: {}", section.source),
    }
}

/// Split lightweight markup into paragraphs and bullet items
///
/// Blank lines separate paragraphs and consecutive text lines are joined with
/// a space. Lines starting with `-`, `*` or `•` followed by a space are bullet
/// items. Markdown heading lines become plain paragraphs, and horizontal rules
/// are dropped.
pub fn parse_body(text: &str) -> Vec<BodyBlock> {
    let mut blocks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || is_rule(trimmed) {
            flush_paragraph(&mut pending, &mut blocks);
            continue;
        }

        if let Some(item) = bullet_text(trimmed) {
            flush_paragraph(&mut pending, &mut blocks);
            let item = strip_emphasis(item);
            if !item.is_empty() {
                blocks.push(BodyBlock::BulletItem(item));
            }
            continue;
        }

        if let Some(heading) = heading_text(trimmed) {
            flush_paragraph(&mut pending, &mut blocks);
            let heading = strip_emphasis(heading);
            if !heading.is_empty() {
                blocks.push(BodyBlock::Paragraph(heading));
            }
            continue;
        }

        pending.push(trimmed);
    }

    flush_paragraph(&mut pending, &mut blocks);
    blocks
}

fn flush_paragraph(pending: &mut Vec<&str>, blocks: &mut Vec<BodyBlock>) {
    if pending.is_empty() {
        return;
    }
    let text = strip_emphasis(&pending.join(" "));
    pending.clear();
    if !text.is_empty() {
        blocks.push(BodyBlock::Paragraph(text));
    }
}

static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s+(.*)$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}(?:\s+(.*))?$").unwrap());
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap());

fn bullet_text(line: &str) -> Option<&str> {
    BULLET
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|item| item.as_str().trim())
}

fn heading_text(line: &str) -> Option<&str> {
    HEADING
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |heading| heading.as_str().trim()))
}

fn is_rule(line: &str) -> bool {
    RULE.is_match(line)
}

fn strip_emphasis(text: &str) -> String {
    EMPHASIS.replace_all(text, "$1$2").trim().to_string()
}
