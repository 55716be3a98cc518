/*!
 * Tests for file utility functions
 */

use std::path::PathBuf;

use cvforge::file_utils::FileManager;

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_generateOutputPath_shouldSuffixLanguageCode() {
    let path = FileManager::generate_output_path("output", "curriculum", "de", "pdf");
    assert_eq!(path, PathBuf::from("output").join("curriculum_de.pdf"));
}

#[test]
fn test_ensureParentDir_shouldCreateAncestorsIdempotently() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("a").join("b").join("curriculum_es.docx");

    FileManager::ensure_parent_dir(&path).unwrap();
    FileManager::ensure_parent_dir(&path).unwrap();

    assert!(temp_dir.path().join("a").join("b").is_dir());
    assert!(!path.exists());
}

#[test]
fn test_ensureParentDir_withBareFileName_shouldDoNothing() {
    assert!(FileManager::ensure_parent_dir("curriculum_es.docx").is_ok());
}

#[test]
fn test_fileSize_shouldReturnNoneForMissingOrDirectory() {
    let temp_dir = create_temp_dir().unwrap();
    let path = create_test_file(temp_dir.path(), "five.txt", "12345").unwrap();

    assert_eq!(FileManager::file_size(&path), Some(5));
    assert_eq!(FileManager::file_size(temp_dir.path()), None);
    assert_eq!(FileManager::file_size(temp_dir.path().join("missing")), None);
}

#[test]
fn test_moveFile_shouldRelocateFile() {
    let temp_dir = create_temp_dir().unwrap();
    let from = create_test_file(temp_dir.path(), "from.pdf", "%PDF").unwrap();
    let to = temp_dir.path().join("out").join("to.pdf");

    FileManager::move_file(&from, &to).unwrap();

    assert!(!from.exists());
    assert_eq!(std::fs::read_to_string(&to).unwrap(), "%PDF");
}
