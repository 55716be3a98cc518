use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// @module: Filesystem helpers for rendered artifacts

// @struct: Artifact file operations
pub struct FileManager;

impl FileManager {
    // @creates: Parent directory of `path` and its ancestors
    pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        match path.as_ref().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    // @generates: `<output_dir>/<basename>_<language_code>.<extension>`
    pub fn generate_output_path<P: AsRef<Path>>(
        output_dir: P,
        basename: &str,
        language_code: &str,
        extension: &str,
    ) -> PathBuf {
        output_dir
            .as_ref()
            .join(format!("{}_{}.{}", basename, language_code, extension))
    }

    // @returns: Size of a regular file, `None` when missing or not a file
    pub fn file_size<P: AsRef<Path>>(path: P) -> Option<u64> {
        fs::metadata(path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
    }

    // @moves: File to `to`, copying when rename crosses filesystems
    pub fn move_file<P1: AsRef<Path>, P2: AsRef<Path>>(from: P1, to: P2) -> io::Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        Self::ensure_parent_dir(to)?;

        if fs::rename(from, to).is_err() {
            fs::copy(from, to)?;
            fs::remove_file(from)?;
        }
        Ok(())
    }
}
