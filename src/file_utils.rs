use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SubtitleError;

// @module: File and directory utilities

// @const: SRT structure sniff (counter line followed by a header line)
static SRT_SNIFF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\r?\n\d{2}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2}:\d{2}:\d{2},\d{3}").unwrap()
});

// Windows-1252 codepoints for the 0x80..0xA0 byte range; the rest of the
// codepage coincides with Unicode
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @checks: .srt extension, case-insensitive
    pub fn is_subtitle_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"))
            .unwrap_or(false)
    }

    /// Error unless the path carries the .srt extension
    pub fn ensure_srt_extension<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if Self::is_subtitle_file(path) {
            Ok(())
        } else {
            Err(SubtitleError::NotSubtitleFile(path.display().to_string()).into())
        }
    }

    /// Default resync output path: `<stem><suffix>.srt` next to the input
    pub fn default_output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
        let input = input.as_ref();
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}{}.srt", stem, suffix))
    }

    /// Open a file as a raw line reader, terminators kept intact
    pub fn open_raw_lines<P: AsRef<Path>>(path: P) -> Result<RawLineReader<BufReader<File>>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;
        Ok(RawLineReader::new(BufReader::new(file)))
    }

    /// Read a whole file into raw lines, terminators kept intact
    pub fn read_raw_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        Self::open_raw_lines(&path)?
            .collect::<io::Result<Vec<String>>>()
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Quick check that file content is structured like an SRT file
    pub fn looks_like_srt(content: &str) -> bool {
        SRT_SNIFF_REGEX.is_match(content)
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Find .srt files under a directory
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_subtitle_file(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}

/// Iterator over raw lines of a byte stream, terminators included.
///
/// Each line is decoded as UTF-8 first; lines that are not valid UTF-8
/// fall back to a Windows-1252 decode, the common legacy encoding for
/// subtitle files. Decoding never fails, I/O errors propagate.
pub struct RawLineReader<R: BufRead> {
    inner: R,
}

impl<R: BufRead> RawLineReader<R> {
    /// Wrap a buffered reader
    pub fn new(inner: R) -> Self {
        RawLineReader { inner }
    }
}

impl<R: BufRead> Iterator for RawLineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.inner.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(decode_subtitle_bytes(&buf))),
            Err(e) => Some(Err(e)),
        }
    }
}

// UTF-8 with Windows-1252 fallback
fn decode_subtitle_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes
            .iter()
            .map(|&b| match b {
                0x80..=0x9F => WINDOWS_1252_HIGH[(b - 0x80) as usize],
                _ => b as char,
            })
            .collect(),
    }
}
