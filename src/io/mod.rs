//! I/O layer: profile directory reading and writing, corpus dump
//! discovery and extraction for profile generation, and lenient text input.
pub mod corpus;
pub use corpus::{locate_corpus_file, read_abstracts};

pub mod profiles;
pub use profiles::{read_profile, read_profile_dir, write_profile};

pub mod text;
pub use text::{LossyLines, read_text_lossy};
