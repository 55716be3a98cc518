/*!
 * PDF export through an external document converter.
 *
 * The document is first written as DOCX into a private temporary directory,
 * converted there, and the result moved to its final location. The temporary
 * directory is removed when it goes out of scope, on success and on every
 * failure path alike.
 */

use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::app_config::ConverterConfig;
use crate::document::Document;
use crate::errors::ExportError;
use crate::file_utils::FileManager;

use super::docx::write_docx;

/// Converts a DOCX file into a PDF
#[async_trait]
pub trait DocumentConverter: Send + Sync + Debug {
    /// Converter name for logs
    fn name(&self) -> &str;

    /// Convert `input` into a PDF inside `out_dir` and return its path
    async fn convert_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ExportError>;
}

/// Headless office-suite converter (LibreOffice `soffice` by default)
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    program: String,
    timeout: Duration,
}

impl OfficeConverter {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.program.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// Isolated user profile so a running office instance does not swallow the job
    fn profile_arg(out_dir: &Path) -> Option<String> {
        url::Url::from_directory_path(out_dir.join("profile"))
            .ok()
            .map(|url| format!("-env:UserInstallation={}", url))
    }
}

#[async_trait]
impl DocumentConverter for OfficeConverter {
    fn name(&self) -> &str {
        &self.program
    }

    async fn convert_to_pdf(&self, input: &Path, out_dir: &Path) -> Result<PathBuf, ExportError> {
        let mut command = Command::new(&self.program);
        if let Some(profile) = Self::profile_arg(out_dir) {
            command.arg(profile);
        }
        command
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| ExportError::ConverterUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        // dropping the future on timeout kills the child
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => return Err(ExportError::ConversionTimeout(self.timeout)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExportError::ConversionFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(out_dir.join(format!("{}.pdf", stem)))
    }
}

/// Write `document` to `path` as PDF using `converter`
pub async fn export_pdf(
    document: &Document,
    converter: &dyn DocumentConverter,
    path: &Path,
) -> Result<(), ExportError> {
    let workdir = tempfile::Builder::new().prefix("cvforge-").tempdir()?;

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let intermediate = workdir.path().join(format!("{}.docx", stem));

    write_docx(document, &intermediate)?;
    debug!(
        "Converting {} with {}",
        intermediate.display(),
        converter.name()
    );

    let converted = converter
        .convert_to_pdf(&intermediate, workdir.path())
        .await?;

    match FileManager::file_size(&converted) {
        Some(size) if size > 0 => {}
        _ => return Err(ExportError::EmptyOutput(converted.display().to_string())),
    }

    FileManager::move_file(&converted, path)?;

    Ok(())
}
