/*!
 * Résumé sections: the declared catalog and the stores that back it.
 */

pub use self::catalog::{SectionCatalog, SectionId, SectionSpec, default_sections};
pub use self::store::{
    FileSectionStore, MemorySectionStore, Section, SectionBody, SectionStore, load_sections,
};

pub mod catalog;
pub mod store;
