/*!
 * Generation pipeline: sections in, artifacts out.
 */

pub use self::orchestrator::{
    GenerationReport, OutputSettings, ResumePipeline, RunStage, TranslationSummary,
};

pub mod orchestrator;
