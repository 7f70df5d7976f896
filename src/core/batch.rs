//! Labelled batch evaluation: streams `label<TAB>text` records through a
//! detector and accumulates a confusion tally keyed by true label.
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::api::{Detector, DetectorFactory};
use crate::error::Result;
use crate::io::LossyLines;

/// Characters of text echoed per example in debug output.
pub const DEBUG_TEXT_CHARS: usize = 100;

/// One record of a batch test file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledExample<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

impl<'a> LabeledExample<'a> {
    /// Split on the first tab. Lines without a tab, or with an empty label,
    /// are not examples.
    pub fn parse(line: &'a str) -> Option<Self> {
        match line.split_once('\t') {
            Some((label, text)) if !label.is_empty() => Some(Self { label, text }),
            _ => None,
        }
    }
}

/// Predicted labels recorded per true label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionTally {
    buckets: BTreeMap<String, Vec<String>>,
}

impl ConfusionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str, predicted: impl Into<String>) {
        self.buckets
            .entry(label.to_string())
            .or_default()
            .push(predicted.into());
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Per-label accuracy, labels in lexicographic order.
    pub fn summary(&self) -> BatchSummary {
        let labels: Vec<LabelAccuracy> = self
            .buckets
            .iter()
            .map(|(label, predictions)| LabelAccuracy::from_predictions(label, predictions))
            .collect();
        let total_correct = labels.iter().map(|l| l.correct).sum();
        let total_count = labels.iter().map(|l| l.total).sum();
        BatchSummary {
            labels,
            total_correct,
            total_count,
        }
    }
}

/// Accuracy of one true label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAccuracy {
    pub label: String,
    pub total: usize,
    pub correct: usize,
    pub predicted: BTreeMap<String, usize>,
}

impl LabelAccuracy {
    fn from_predictions(label: &str, predictions: &[String]) -> Self {
        let mut predicted = BTreeMap::new();
        for p in predictions {
            *predicted.entry(p.clone()).or_insert(0) += 1;
        }
        Self {
            label: label.to_string(),
            total: predictions.len(),
            correct: predicted.get(label).copied().unwrap_or(0),
            predicted,
        }
    }

    /// `None` when the label has no examples.
    pub fn rate(&self) -> Option<f64> {
        ratio(self.correct, self.total)
    }
}

impl fmt::Display for LabelAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{}=", self.label, self.correct, self.total)?;
        match self.rate() {
            Some(rate) => write!(f, "{}", format_half_up(rate, 2))?,
            None => write!(f, "{NO_DATA}")?,
        }
        let counts: Vec<String> = self
            .predicted
            .iter()
            .map(|(lang, count)| format!("{lang}={count}"))
            .collect();
        write!(f, "): {{{}}}", counts.join(", "))
    }
}

const NO_DATA: &str = "no data";

/// Fixed-point rendering of a non-negative `value` that rounds ties up.
/// Rounding works on the shortest decimal form of `value`, so `0.125`
/// becomes `0.13` and `0.285` becomes `0.29`.
fn format_half_up(value: f64, places: usize) -> String {
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .collect();

    if frac_part.as_bytes().get(places).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let int_len = digits.len() - places;
    let mut out: String = digits[..int_len].iter().map(|&d| char::from(d)).collect();
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| char::from(d)));
    }
    out
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Per-label lines plus the aggregate over every label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub labels: Vec<LabelAccuracy>,
    pub total_correct: usize,
    pub total_count: usize,
}

impl BatchSummary {
    /// `None` when nothing was tallied.
    pub fn rate(&self) -> Option<f64> {
        ratio(self.total_correct, self.total_count)
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for label in &self.labels {
            writeln!(out, "{label}")?;
        }
        writeln!(out, "{}", self.total_line())
    }

    pub fn total_line(&self) -> String {
        match self.rate() {
            Some(rate) => format!(
                "total: {}/{} = {}",
                self.total_correct,
                self.total_count,
                format_half_up(rate, 3)
            ),
            None => format!(
                "total: {}/{} = {NO_DATA}",
                self.total_correct, self.total_count
            ),
        }
    }
}

/// What happened while evaluating one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    /// Examples tallied from this file alone.
    pub examples: usize,
    /// Set when reading or detection stopped the file early.
    pub error: Option<String>,
    /// Cumulative summary printed after this file.
    pub summary: BatchSummary,
}

/// Streams batch files through fresh detectors, one per example.
pub struct BatchHarness<'a, F: DetectorFactory> {
    factory: &'a F,
    alpha: f64,
    debug: bool,
    tally: ConfusionTally,
}

impl<'a, F: DetectorFactory> BatchHarness<'a, F> {
    pub fn new(factory: &'a F, alpha: f64, debug: bool) -> Self {
        Self {
            factory,
            alpha,
            debug,
            tally: ConfusionTally::new(),
        }
    }

    pub fn tally(&self) -> &ConfusionTally {
        &self.tally
    }

    /// Evaluate one file, then write the report for everything tallied so
    /// far, including earlier files. The report is written even when the
    /// file fails part way.
    pub fn run_file<W: Write>(&mut self, path: &Path, out: &mut W) -> FileReport {
        let mut examples = 0;
        let result = self.stream_file(path, out, &mut examples);
        let mut failure = result.err().map(|e| {
            error!("{}: {}", path.display(), e);
            e.to_string()
        });

        let summary = self.tally.summary();
        if let Err(e) = summary.write_to(out) {
            error!("{}: failed to write report: {}", path.display(), e);
            failure.get_or_insert_with(|| e.to_string());
        }
        debug!("{:?}: {} examples tallied", path, examples);

        FileReport {
            path: path.to_path_buf(),
            examples,
            error: failure,
            summary,
        }
    }

    fn stream_file<W: Write>(&mut self, path: &Path, out: &mut W, examples: &mut usize) -> Result<()> {
        let reader = BufReader::new(File::open(path)?);
        for line in LossyLines::new(reader) {
            let line = line?;
            let Some(example) = LabeledExample::parse(&line) else {
                continue;
            };

            let mut detector = self.factory.create(self.alpha);
            detector.append(example.text);
            let predicted = detector.detect()?;

            if self.debug {
                let preview: String = example.text.chars().take(DEBUG_TEXT_CHARS).collect();
                writeln!(out, "{},{},{}", example.label, predicted, preview)?;
            }
            self.tally.record(example.label, predicted);
            *examples += 1;
        }
        Ok(())
    }
}
