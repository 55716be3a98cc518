// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, info, warn};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cvforge::app_config::{Config, LogLevel, TranslationProvider};
use cvforge::export::ExportFormat;
use cvforge::language_utils::Language;
use cvforge::pipeline::ResumePipeline;
use cvforge::sections::SectionId;
use cvforge::translation::TranslationCache;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    OpenAI,
    Anthropic,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the résumé in one language (default command)
    Generate(GenerateArgs),

    /// Print one section, translated into the requested language
    Preview(PreviewArgs),

    /// Generate shell completions for cvforge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that loads the configuration
#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    /// Target language (code or native name, e.g. 'en', 'fra', 'Deutsch')
    #[arg(short, long)]
    language: Option<String>,

    /// Output formats; all formats when omitted
    #[arg(short, long = "format", value_enum, num_args = 1..)]
    formats: Vec<ExportFormat>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug, Clone)]
struct PreviewArgs {
    /// Section identifier (e.g. 'profile', 'languages')
    #[arg(value_name = "SECTION")]
    section: String,

    /// Target language (code or native name)
    #[arg(short, long)]
    language: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
}

/// cvforge - multilingual résumé generator
///
/// Builds a one-page résumé from per-section markdown files, translates it with
/// an AI provider and exports it as DOCX and PDF.
#[derive(Parser, Debug)]
#[command(name = "cvforge")]
#[command(version)]
#[command(about = "Multilingual résumé generator")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "cvforge reads one markdown file per résumé section, translates the text with an AI provider and writes DOCX and PDF files.

EXAMPLES:
    cvforge                                  # Generate in the configured language
    cvforge -l en                            # Generate the English résumé
    cvforge -l fr -f docx                    # French, Word output only
    cvforge -l de -o out/ --log-level debug  # German into out/ with debug logging
    cvforge preview languages -l pt          # Show one translated section
    cvforge completions bash > cvforge.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The API key is read from the environment variable
    named by translation.api_key_env (GOOGLE_API_KEY by default); without it
    every language is rendered from the source text.

PDF OUTPUT:
    PDF files are converted from DOCX by a headless LibreOffice ('soffice').")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (prefix, color) = Self::decoration(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            color,
            now,
            prefix,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cvforge", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Preview(args)) => run_preview(args).await,
        None => run_generate(cli.generate).await,
    }
}

/// Load the configuration and apply command-line overrides
fn load_config(options: &ConfigArgs) -> Result<Config> {
    // Apply the command-line level first so config loading is logged at it
    if let Some(level) = &options.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

fn resolve_language(requested: Option<&str>, config: &Config) -> Result<Language> {
    match requested {
        Some(name) => name
            .parse::<Language>()
            .with_context(|| format!("Unsupported language: {}", name)),
        None => Ok(config.target_language),
    }
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let language = resolve_language(args.language.as_deref(), &config)?;
    let formats: BTreeSet<ExportFormat> = if args.formats.is_empty() {
        ExportFormat::ALL.into_iter().collect()
    } else {
        args.formats.into_iter().collect()
    };

    let pipeline = ResumePipeline::from_config(&config, TranslationCache::new())
        .context("Configuration validation failed")?;

    info!(
        "🚀 cvforge: {} résumé ({})",
        language.native_name(),
        formats
            .iter()
            .map(|format| format.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let progress = spinner(format!("{}…", language.native_name()));
    let report = pipeline.generate(language, &formats).await;
    progress.finish_and_clear();

    let summary = report.translation;
    debug!(
        "Sections: {} translated, {} passed through, {} missing",
        summary.translated, summary.passed_through, summary.missing
    );
    if summary.missing > 0 {
        warn!("{} section(s) rendered with a placeholder", summary.missing);
    }

    for (format, result) in &report.artifacts {
        match result {
            Ok(artifact) => info!(
                "{}: {} ({})",
                format.action_label(language),
                artifact.path.display(),
                artifact.mime_type()
            ),
            Err(e) => error!("{}: {}", format.failure_message(language), e),
        }
    }

    if report.all_failed() {
        return Err(anyhow!("No output file was generated"));
    }

    Ok(())
}

async fn run_preview(args: PreviewArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let language = resolve_language(args.language.as_deref(), &config)?;

    let pipeline = ResumePipeline::from_config(&config, TranslationCache::new())
        .context("Configuration validation failed")?;

    let id = SectionId::new(args.section);
    let title = pipeline.catalog().label(&id, language).to_string();
    let result = pipeline.preview(&id, language).await?;

    if !result.ok {
        warn!("Showing untranslated text for '{}'", id);
    }

    println!("## {}\n\n{}", title, result.text.trim_end());
    Ok(())
}
