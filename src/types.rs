//! Shared types used across the crate: detection results (`Language`) and
//! the top-level command selector (`Command`).
use serde::{Deserialize, Serialize};

/// One entry of a detector's probability distribution.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Language {
    pub lang: String,
    pub prob: f64,
}

impl Language {
    pub fn new(lang: impl Into<String>, prob: f64) -> Self {
        Self {
            lang: lang.into(),
            prob,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.lang, self.prob)
    }
}

/// Render a distribution as `[en:0.99, fr:0.01]`.
pub fn format_distribution(languages: &[Language]) -> String {
    let items: Vec<String> = languages.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Top-level mode selected by a boolean flag.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum Command {
    GenerateProfile,
    DetectLanguage,
    BatchTest,
}

impl Command {
    /// Commands in dispatch priority order.
    pub const ALL: [Command; 3] = [
        Command::GenerateProfile,
        Command::DetectLanguage,
        Command::BatchTest,
    ];

    pub const fn flag(self) -> &'static str {
        match self {
            Command::GenerateProfile => "--genprofile",
            Command::DetectLanguage => "--detectlang",
            Command::BatchTest => "--batchtest",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::GenerateProfile => write!(f, "GenerateProfile"),
            Command::DetectLanguage => write!(f, "DetectLanguage"),
            Command::BatchTest => write!(f, "BatchTest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distribution_formatting() {
        let langs = [Language::new("en", 0.75), Language::new("fr", 0.25)];
        assert_eq!(format_distribution(&langs), "[en:0.75, fr:0.25]");
        assert_eq!(format_distribution(&[]), "[]");
    }
}
