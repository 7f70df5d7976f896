//! High-level library API: the seams to the detection backend, plus the
//! entry points behind each CLI command (profile generation, per-file
//! detection and labelled batch evaluation). Prefer these over the
//! low-level `core` and `io` modules when embedding the harness.
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::core::batch::{BatchHarness, FileReport};
use crate::error::Result;
use crate::io::read_text_lossy;
use crate::types::{Language, format_distribution};

/// A single detection run over accumulated text.
pub trait Detector {
    fn append(&mut self, text: &str);

    /// Log per-step diagnostics while detecting.
    fn set_verbose(&mut self);

    /// Languages in descending probability order.
    fn probabilities(&mut self) -> Result<Vec<Language>>;

    /// Best single guess.
    fn detect(&mut self) -> Result<String>;
}

/// Creates fresh detectors from loaded profiles.
pub trait DetectorFactory {
    type Detector: Detector;

    /// `alpha` is the additive smoothing strength.
    fn create(&self, alpha: f64) -> Self::Detector;
}

/// Loads language profiles from a directory.
pub trait ModelLoader {
    type Factory: DetectorFactory;

    fn load(&self, directory: &Path, seed: Option<i64>) -> Result<Self::Factory>;
}

/// Builds a language profile from a corpus directory.
pub trait ProfileGenerator {
    /// Writes the profile for `lang` into `output_dir` and returns its path.
    fn generate(&self, corpus_dir: &Path, lang: &str, output_dir: &Path) -> Result<PathBuf>;
}

/// Outcome counts of a per-file detection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectReport {
    pub processed: usize,
    pub errors: usize,
}

/// Detect the language of each file and write `<file>:<distribution>` to `out`.
///
/// Invalid UTF-8 is replaced rather than rejected. A failure on one file
/// is logged and counted; the remaining files are still processed.
pub fn detect_files<F, P, W>(
    factory: &F,
    files: &[P],
    alpha: f64,
    verbose: bool,
    out: &mut W,
) -> DetectReport
where
    F: DetectorFactory,
    P: AsRef<Path>,
    W: Write,
{
    let mut report = DetectReport::default();
    for file in files {
        let path = file.as_ref();
        match detect_file(factory, path, alpha, verbose) {
            Ok(languages) => {
                let line = format!("{}:{}", path.display(), format_distribution(&languages));
                match writeln!(out, "{line}") {
                    Ok(()) => report.processed += 1,
                    Err(e) => {
                        error!("{}: {}", path.display(), e);
                        report.errors += 1;
                    }
                }
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                report.errors += 1;
            }
        }
    }
    report
}

fn detect_file<F: DetectorFactory>(
    factory: &F,
    path: &Path,
    alpha: f64,
    verbose: bool,
) -> Result<Vec<Language>> {
    let text = read_text_lossy(path)?;
    let mut detector = factory.create(alpha);
    if verbose {
        detector.set_verbose();
    }
    detector.append(&text);
    detector.probabilities()
}

/// Cumulative result of a batch evaluation over several files.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Examples tallied across every file of the run.
    pub fn total_examples(&self) -> usize {
        self.files.last().map_or(0, |file| file.summary.total_count)
    }

    pub fn errors(&self) -> usize {
        self.files.iter().filter(|file| file.error.is_some()).count()
    }
}

/// Evaluate `files` of `label<TAB>text` lines and write one report per file.
///
/// The confusion tally is shared across files, so every report after the
/// first includes the examples of the files before it.
pub fn batch_test<F, P, W>(
    factory: &F,
    files: &[P],
    alpha: f64,
    debug: bool,
    out: &mut W,
) -> BatchReport
where
    F: DetectorFactory,
    P: AsRef<Path>,
    W: Write,
{
    let mut harness = BatchHarness::new(factory, alpha, debug);
    let files = files
        .iter()
        .map(|file| harness.run_file(file.as_ref(), out))
        .collect();
    let report = BatchReport { files };
    info!(
        "Batch test complete: {} examples, {} file errors",
        report.total_examples(),
        report.errors()
    );
    report
}
