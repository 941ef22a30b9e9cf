use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::overlap::OverlapScanner;
use crate::resync::ResyncEngine;
use crate::timestamp::Timestamp;

// @module: Application controller for subtitle timing runs

/// Main application controller driving resync and overlap runs.
///
/// One controller can serve many runs; the per-run state (engine, scanner,
/// open files) is constructed fresh for each file.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Resync one file: shift every header line by `offset_seconds`.
    ///
    /// `output` defaults to `<stem><suffix>.srt` next to the input. With a
    /// bounds window, header lines starting outside it pass through
    /// unshifted. Returns the path written.
    pub fn run_resync(
        &self,
        input: &Path,
        output: Option<&Path>,
        offset_seconds: f64,
        bounds: Option<(Timestamp, Timestamp)>,
    ) -> Result<PathBuf> {
        Self::validate_input(input)?;

        let output = output.map(Path::to_path_buf).unwrap_or_else(|| {
            FileManager::default_output_path(input, &self.config.output_suffix)
        });
        FileManager::ensure_srt_extension(&output)?;

        let mut engine = ResyncEngine::new(offset_seconds);
        if let Some((begin, end)) = bounds {
            engine = engine.with_bounds(begin, end);
        }

        let reader = FileManager::open_raw_lines(input)?;
        let file = File::create(&output)
            .with_context(|| format!("Failed to create output file: {:?}", output))?;
        let mut sink = BufWriter::new(file);

        let mut shifted = 0usize;
        for line in reader {
            let line = line.with_context(|| format!("Failed to read line from {:?}", input))?;
            match engine.resync_line(&line)? {
                Some(rendered) => {
                    sink.write_all(rendered.as_bytes())?;
                    shifted += 1;
                }
                None => sink.write_all(line.as_bytes())?,
            }
        }
        sink.flush().context("Failed to flush output file")?;

        if shifted == 0 {
            warn!("No header lines shifted in {:?}", input);
        }
        info!(
            "Resynced {:?} by {}s ({} header lines) -> {:?}",
            input, offset_seconds, shifted, output
        );

        Ok(output)
    }

    /// Resync every .srt file under a directory with the same offset.
    ///
    /// Earlier resync outputs (stems already ending with the configured
    /// suffix) are skipped so repeated runs do not copy copies.
    pub fn run_resync_directory(
        &self,
        dir: &Path,
        offset_seconds: f64,
        bounds: Option<(Timestamp, Timestamp)>,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for file in FileManager::find_subtitle_files(dir)? {
            let stem = file.file_stem().unwrap_or_default().to_string_lossy().to_string();
            if stem.ends_with(&self.config.output_suffix) {
                debug!("Skipping earlier resync output: {:?}", file);
                continue;
            }
            written.push(self.run_resync(&file, None, offset_seconds, bounds)?);
        }

        if written.is_empty() {
            warn!("No subtitle files found in {:?}", dir);
        }
        Ok(written)
    }

    /// Scan one file for timestamp inversions, writing one diagnostic line
    /// per violation to the sink. Returns the number of violations.
    pub fn run_overlap<W: Write>(&self, input: &Path, sink: &mut W) -> Result<usize> {
        Self::validate_input(input)?;

        let mut scanner = OverlapScanner::new();
        let mut found = 0usize;

        for line in FileManager::open_raw_lines(input)? {
            let line = line.with_context(|| format!("Failed to read line from {:?}", input))?;
            for report in scanner.scan_line(&line)? {
                writeln!(sink, "{}", report).context("Failed to write overlap report")?;
                found += 1;
            }
        }

        info!("Found {} timestamp inversion(s) in {:?}", found, input);
        Ok(found)
    }

    /// Scan every .srt file under a directory; returns the total count
    pub fn run_overlap_directory<W: Write>(&self, dir: &Path, sink: &mut W) -> Result<usize> {
        let files = FileManager::find_subtitle_files(dir)?;
        if files.is_empty() {
            warn!("No subtitle files found in {:?}", dir);
            return Ok(0);
        }

        let mut total = 0usize;
        for file in files {
            info!("Scanning {:?}", file);
            total += self.run_overlap(&file, sink)?;
        }
        Ok(total)
    }

    // Existence and extension checks, plus a cheap structure sniff on the
    // first few lines that only warns; malformed content is passthrough
    fn validate_input(path: &Path) -> Result<()> {
        if !FileManager::file_exists(path) {
            return Err(anyhow!("File not found: {:?}", path));
        }
        FileManager::ensure_srt_extension(path)?;

        let head: String = FileManager::open_raw_lines(path)?
            .take(8)
            .collect::<io::Result<Vec<String>>>()
            .with_context(|| format!("Failed to read file: {:?}", path))?
            .concat();
        if !FileManager::looks_like_srt(&head) {
            warn!("Input does not start with an SRT cue structure: {:?}", path);
        }

        Ok(())
    }
}
