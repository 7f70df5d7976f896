//! Core building blocks: run parameters, n-gram extraction, language
//! profiles, the bundled detector backend and the batch evaluation
//! harness. These are consumed by the high-level `api` module.
pub mod batch;
pub mod detector;
pub mod ngram;
pub mod params;
pub mod profile;
