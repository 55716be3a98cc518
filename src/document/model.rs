/*!
 * Document model for the synthesized résumé.
 *
 * A `Document` is a flat, ordered list of styled blocks. Styles depend only on
 * the block kind, never on the text, so every language renders with the same
 * compact one-page layout.
 */

use crate::language_utils::Language;

/// Horizontal alignment of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// Language-independent style descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStyle {
    /// Font family name
    pub font_family: String,
    /// Font size in points
    pub point_size: u16,
    pub alignment: Alignment,
    /// Space before the block, in points
    pub spacing_before: u16,
    /// Space after the block, in points
    pub spacing_after: u16,
    pub bold: bool,
}

/// Kind of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Document header
    Title,
    /// Section heading
    Heading { level: u8 },
    Paragraph,
    BulletItem,
}

/// One styled unit of the document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentBlock {
    pub kind: BlockKind,
    pub text: String,
    pub style: BlockStyle,
}

impl DocumentBlock {
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }
}

/// Style for each block kind
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub title: BlockStyle,
    pub heading: BlockStyle,
    pub body: BlockStyle,
}

impl StyleSheet {
    /// Style sheet using one font family throughout
    pub fn with_font(font_family: &str) -> Self {
        let base = BlockStyle {
            font_family: font_family.to_string(),
            point_size: 9,
            alignment: Alignment::Left,
            spacing_before: 0,
            spacing_after: 0,
            bold: false,
        };

        Self {
            title: BlockStyle {
                point_size: 12,
                alignment: Alignment::Center,
                spacing_after: 6,
                bold: true,
                ..base.clone()
            },
            heading: BlockStyle {
                point_size: 11,
                bold: true,
                ..base.clone()
            },
            body: base,
        }
    }

    pub fn style_for(&self, kind: BlockKind) -> &BlockStyle {
        match kind {
            BlockKind::Title => &self.title,
            BlockKind::Heading { .. } => &self.heading,
            BlockKind::Paragraph | BlockKind::BulletItem => &self.body,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::with_font("Arial")
    }
}

/// Ordered block sequence for one language
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub language: Language,
    pub blocks: Vec<DocumentBlock>,
}

impl Document {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: BlockKind, text: impl Into<String>, styles: &StyleSheet) {
        self.blocks.push(DocumentBlock {
            kind,
            text: text.into(),
            style: styles.style_for(kind).clone(),
        });
    }

    /// Section headings in document order
    pub fn headings(&self) -> impl Iterator<Item = &DocumentBlock> {
        self.blocks.iter().filter(|block| block.is_heading())
    }

    /// Block kinds in order, handy for structural comparisons
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|block| block.kind).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
