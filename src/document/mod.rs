/*!
 * Document model and builder.
 */

pub use self::builder::{BodyBlock, DocumentBuilder, SECTION_HEADING_LEVEL, parse_body};
pub use self::model::{Alignment, BlockKind, BlockStyle, Document, DocumentBlock, StyleSheet};

pub mod builder;
pub mod model;
