/*!
 * Tests for file and folder utilities
 */

use std::fs;
use anyhow::Result;
use srtfix::file_utils::FileManager;
use crate::common;

/// Extension check is case-insensitive and rejects everything else
#[test]
fn test_is_subtitle_file_withVariousPaths_shouldCheckExtension() {
    assert!(FileManager::is_subtitle_file("movie.srt"));
    assert!(FileManager::is_subtitle_file("movie.SRT"));
    assert!(!FileManager::is_subtitle_file("movie.txt"));
    assert!(!FileManager::is_subtitle_file("movie"));

    assert!(FileManager::ensure_srt_extension("movie.srt").is_ok());
    assert!(FileManager::ensure_srt_extension("movie.mkv").is_err());
}

/// Default resync output lands next to the input as <stem>_copy.srt
#[test]
fn test_default_output_path_withSrtInput_shouldAppendSuffix() {
    let output = FileManager::default_output_path("subs/movie.srt", "_copy");
    assert_eq!(output.to_string_lossy(), "subs/movie_copy.srt");
}

/// Raw line reading keeps terminators intact, CRLF and LF alike
#[test]
fn test_read_raw_lines_withMixedTerminators_shouldKeepThemIntact() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "mixed.srt",
        "1\r\n00:00:01,000 --> 00:00:02,000\r\nText\nno terminator",
    )?;

    let lines = FileManager::read_raw_lines(&path)?;
    assert_eq!(
        lines,
        vec![
            "1\r\n".to_string(),
            "00:00:01,000 --> 00:00:02,000\r\n".to_string(),
            "Text\n".to_string(),
            "no terminator".to_string(),
        ]
    );
    Ok(())
}

/// Bytes that are not valid UTF-8 decode through the Windows-1252 fallback
#[test]
fn test_read_raw_lines_withWindows1252Bytes_shouldDecodeFallback() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("legacy.srt");
    // "café" with a 0x93 curly quote, as Windows-1252 bytes
    fs::write(&path, b"caf\xe9 \x93quoted\x94\n")?;

    let lines = FileManager::read_raw_lines(&path)?;
    assert_eq!(lines, vec!["caf\u{e9} \u{201c}quoted\u{201d}\n".to_string()]);
    Ok(())
}

/// The structure sniff recognizes counter-then-header openings
#[test]
fn test_looks_like_srt_withCueOpening_shouldMatch() {
    assert!(FileManager::looks_like_srt(
        "1\n00:00:01,000 --> 00:00:04,000\nText\n"
    ));
    assert!(FileManager::looks_like_srt(
        "1\r\n00:00:01,000 --> 00:00:04,000\r\n"
    ));
    assert!(!FileManager::looks_like_srt("Just some prose, no cues.\n"));
}

/// Directory discovery finds .srt files and nothing else
#[test]
fn test_find_subtitle_files_withMixedDirectory_shouldFindOnlySrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_subtitle(&dir, "a.srt")?;
    common::create_test_subtitle(&dir, "b.srt")?;
    common::create_test_file(&dir, "notes.txt", "not a subtitle")?;

    let found = FileManager::find_subtitle_files(&dir)?;
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| FileManager::is_subtitle_file(p)));
    Ok(())
}

/// Writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/dir/out.srt");

    FileManager::write_to_file(&path, "content\n")?;
    assert_eq!(fs::read_to_string(&path)?, "content\n");
    Ok(())
}
