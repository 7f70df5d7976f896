use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::options::ParsedOptions;

pub const DIRECTORY_KEY: &str = "directory";
pub const ALPHA_KEY: &str = "alpha";
pub const SEED_KEY: &str = "seed";
pub const DEBUG_FLAG: &str = "--debug";

pub const DEFAULT_PROFILE_DIR: &str = "./";
/// Expected Likelihood Estimation.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Detection parameters shared by the classification and batch commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectParams {
    pub profile_dir: PathBuf,
    /// Smoothing strength handed to each detector
    pub alpha: f64,
    /// Fixed sampling seed; None means fresh randomness per detector
    pub seed: Option<i64>,
    pub debug: bool,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            profile_dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            alpha: DEFAULT_ALPHA,
            seed: None,
            debug: false,
        }
    }
}

impl DetectParams {
    /// Resolve parameters from parsed options. Malformed numeric values fall
    /// back to their defaults with a warning.
    pub fn from_options(options: &ParsedOptions) -> Self {
        let alpha = options.get_f64(ALPHA_KEY).unwrap_or_else(|e| {
            warn!("{e}; using default alpha {DEFAULT_ALPHA}");
            None
        });
        let seed = options.get_i64(SEED_KEY).unwrap_or_else(|e| {
            warn!("{e}; running without a fixed seed");
            None
        });

        Self {
            profile_dir: options
                .get(DIRECTORY_KEY)
                .map_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR), PathBuf::from),
            alpha: alpha.unwrap_or(DEFAULT_ALPHA),
            seed,
            debug: options.has_flag(DEBUG_FLAG),
        }
    }
}
