//! Scripted backend for driving the harness without real profiles.
#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use langdetect::{
    Detector, DetectorFactory, Error, Language, ModelLoader, ProfileGenerator, Result,
};

/// Text containing this marker makes detection fail.
pub const FAIL_MARKER: &str = "FAIL";

/// Calls made against a [`ScriptedBackend`], in order.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Predicts the first word of the text as its language.
#[derive(Default)]
pub struct ScriptedBackend {
    pub calls: CallLog,
    pub fail_load: bool,
}

impl ScriptedBackend {
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ModelLoader for ScriptedBackend {
    type Factory = ScriptedFactory;

    fn load(&self, directory: &Path, seed: Option<i64>) -> Result<ScriptedFactory> {
        self.calls
            .borrow_mut()
            .push(format!("load {} {:?}", directory.display(), seed));
        if self.fail_load {
            return Err(Error::ProfileLoad("need to load profiles".to_string()));
        }
        Ok(ScriptedFactory {
            calls: Rc::clone(&self.calls),
        })
    }
}

impl ProfileGenerator for ScriptedBackend {
    fn generate(&self, corpus_dir: &Path, lang: &str, output_dir: &Path) -> Result<PathBuf> {
        self.calls
            .borrow_mut()
            .push(format!("generate {} {}", corpus_dir.display(), lang));
        let path = output_dir.join(lang);
        fs::write(&path, "{}")?;
        Ok(path)
    }
}

pub struct ScriptedFactory {
    calls: CallLog,
}

impl DetectorFactory for ScriptedFactory {
    type Detector = ScriptedDetector;

    fn create(&self, alpha: f64) -> ScriptedDetector {
        self.calls.borrow_mut().push(format!("create {alpha}"));
        ScriptedDetector {
            calls: Rc::clone(&self.calls),
            text: String::new(),
        }
    }
}

pub struct ScriptedDetector {
    calls: CallLog,
    text: String,
}

impl Detector for ScriptedDetector {
    fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn set_verbose(&mut self) {
        self.calls.borrow_mut().push("verbose".to_string());
    }

    fn probabilities(&mut self) -> Result<Vec<Language>> {
        if self.text.contains(FAIL_MARKER) {
            return Err(Error::NoFeatures);
        }
        Ok(self
            .text
            .split_whitespace()
            .next()
            .map(|word| vec![Language::new(word, 1.0)])
            .unwrap_or_default())
    }

    fn detect(&mut self) -> Result<String> {
        let languages = self.probabilities()?;
        Ok(languages
            .into_iter()
            .next()
            .map_or_else(|| "unknown".to_string(), |l| l.lang))
    }
}

pub fn output_string(out: Vec<u8>) -> String {
    String::from_utf8(out).expect("utf-8 output")
}
