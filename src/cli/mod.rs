//! Command Line Interface (CLI) layer for langdetect.
//!
//! This module defines the flag table and command selection (`args`), error
//! types (`errors`), and the orchestration logic (`runner`) for profile
//! generation, per-file detection and batch evaluation. It wires
//! user-provided options to the library functionality exposed via
//! `langdetect::api`.
//!
//! If you are embedding the detector into another application, prefer using
//! the high-level `langdetect::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::{parse_args, select_command};
pub use errors::AppError;
pub use runner::{dispatch, init_logging, run, start};
