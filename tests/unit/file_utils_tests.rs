/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use screenwright::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    // Create a temporary test file
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(&temp_dir.path().to_path_buf(), "test_file_exists.tmp", "test content")?;

    // Test that file_exists works correctly
    assert!(FileManager::file_exists(test_file.to_str().unwrap()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path composes stem, tag and extension
#[test]
fn test_generate_output_path_withTagAndExtension_shouldComposeFilename() {
    let input = Path::new("/projects/draft/script.txt");
    let output_dir = Path::new("/projects/out");

    let text_path = FileManager::generate_output_path(input, output_dir, "formatted", "txt");
    assert_eq!(text_path, Path::new("/projects/out/script.formatted.txt"));

    let json_path = FileManager::generate_output_path(input, output_dir, "formatted", "json");
    assert_eq!(json_path, Path::new("/projects/out/script.formatted.json"));
}

/// Test that ensure_dir creates nested directories and tolerates reruns
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;
    assert!(FileManager::dir_exists(&nested));

    // A second call on the existing directory is fine
    FileManager::ensure_dir(&nested)?;

    Ok(())
}

/// Test that find_files walks subdirectories and matches extensions
#[test]
fn test_find_files_withNestedDirectories_shouldFindMatchingExtensions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let sub = root.join("episode_two");
    fs::create_dir(&sub)?;

    common::create_test_file(&root, "pilot.txt", "int. kitchen - day")?;
    common::create_test_file(&sub, "finale.txt", "ext. street - night")?;
    common::create_test_file(&root, "notes.json", "{}")?;

    let scripts = FileManager::find_files(&root, "txt")?;
    assert_eq!(scripts.len(), 2);
    assert!(scripts.iter().any(|p| p.ends_with("pilot.txt")));
    assert!(scripts.iter().any(|p| p.ends_with("finale.txt")));

    // A leading dot on the extension works too
    let documents = FileManager::find_files(&root, ".json")?;
    assert_eq!(documents.len(), 1);

    Ok(())
}

/// Test that write_to_file creates parent directories and read_to_string round-trips
#[test]
fn test_read_write_roundTrip_shouldPreserveContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("nested").join("output.txt");

    FileManager::write_to_file(&target, "INT. KITCHEN - DAY\n")?;
    let content = FileManager::read_to_string(&target)?;

    assert_eq!(content, "INT. KITCHEN - DAY\n");
    Ok(())
}

/// Test that append_to_log_file stamps and accumulates lines
#[test]
fn test_append_to_log_file_withTwoEntries_shouldAccumulate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let log_path = temp_dir.path().join("processing.log");

    FileManager::append_to_log_file(&log_path, "first entry")?;
    FileManager::append_to_log_file(&log_path, "second entry")?;

    let content = fs::read_to_string(&log_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("first entry"));
    assert!(lines[1].ends_with("second entry"));
    Ok(())
}

/// Test file type detection by extension
#[test]
fn test_detect_file_type_withKnownExtensions_shouldUseThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    let document = common::create_test_file(&root, "saved.json", "{\"metadata\":{\"title\":\"x\"}}")?;
    assert_eq!(FileManager::detect_file_type(&document)?, FileType::Document);

    for extension in ["txt", "fountain", "screenplay"] {
        let script =
            common::create_test_file(&root, &format!("draft.{}", extension), "some text")?;
        assert_eq!(FileManager::detect_file_type(&script)?, FileType::PlainText);
    }

    Ok(())
}

/// Test file type detection by content sniffing when the extension says nothing
#[test]
fn test_detect_file_type_withUnknownExtension_shouldSniffContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();

    let script = common::create_test_file(
        &root,
        "draft.backup",
        "INT. KITCHEN - DAY\n\nThe kettle shrieks.\n",
    )?;
    assert_eq!(FileManager::detect_file_type(&script)?, FileType::PlainText);

    let document = common::create_test_file(&root, "saved.backup", "{ \"elements\": [] }")?;
    assert_eq!(FileManager::detect_file_type(&document)?, FileType::Document);

    let noise = common::create_test_file(&root, "noise.backup", "nothing scriptlike here")?;
    assert_eq!(FileManager::detect_file_type(&noise)?, FileType::Unknown);

    Ok(())
}

/// Test that detection errors on a missing file
#[test]
fn test_detect_file_type_withMissingFile_shouldError() {
    assert!(FileManager::detect_file_type("no_such_file.backup").is_err());
}
