//! Bundled n-gram backend for the [`crate::api`] traits.
//!
//! Detection is a randomised naive-Bayes estimate: each trial samples
//! n-grams from the input and multiplies in their per-language likelihoods
//! under a slightly perturbed smoothing parameter, and the trials are
//! averaged. A seed makes the sampling reproducible.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::ngram::{self, N_GRAM};
use super::profile::LangProfile;
use crate::api::{Detector, DetectorFactory, ModelLoader, ProfileGenerator};
use crate::error::{Error, Result};
use crate::io::{locate_corpus_file, read_abstracts, read_profile_dir, write_profile};
use crate::types::Language;

const ALPHA_WIDTH: f64 = 0.05;
const BASE_FREQ: f64 = 10_000.0;
const CONV_THRESHOLD: f64 = 0.99999;
const ITERATION_LIMIT: usize = 1000;
const MAX_TEXT_LENGTH: usize = 10_000;
const N_TRIAL: usize = 7;
const PROB_THRESHOLD: f64 = 0.1;

pub const UNKNOWN_LANG: &str = "unknown";

/// Profile-directory backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramModel;

impl ModelLoader for NgramModel {
    type Factory = NgramFactory;

    fn load(&self, directory: &Path, seed: Option<i64>) -> Result<NgramFactory> {
        let profiles = read_profile_dir(directory)?;
        let factory = NgramFactory::from_profiles(&profiles)?;
        info!(
            "Loaded {} profiles from {:?}",
            factory.languages().len(),
            directory
        );
        Ok(match seed {
            Some(seed) => factory.with_seed(seed),
            None => factory,
        })
    }
}

impl ProfileGenerator for NgramModel {
    fn generate(&self, corpus_dir: &Path, lang: &str, output_dir: &Path) -> Result<PathBuf> {
        let corpus = locate_corpus_file(corpus_dir, lang)?.ok_or_else(|| Error::CorpusNotFound {
            lang: lang.to_string(),
        })?;
        info!("Building profile {} from {:?}", lang, corpus);

        let mut profile = LangProfile::new(lang);
        let abstracts = read_abstracts(&corpus, &mut profile)?;
        profile.omit_less_freq();
        debug!(
            "{} abstracts, {} n-grams kept",
            abstracts,
            profile.freq.len()
        );
        write_profile(&profile, output_dir)
    }
}

#[derive(Debug)]
struct ModelTables {
    languages: Vec<String>,
    /// Per n-gram likelihood in each language, indexed like `languages`.
    word_lang_prob: HashMap<String, Vec<f64>>,
}

/// Loaded profiles, shared by every detector it creates.
#[derive(Debug, Clone)]
pub struct NgramFactory {
    tables: Arc<ModelTables>,
    seed: Option<u64>,
}

impl NgramFactory {
    /// # Errors
    ///
    /// Fails when `profiles` is empty or names a language twice.
    pub fn from_profiles(profiles: &[LangProfile]) -> Result<Self> {
        if profiles.is_empty() {
            return Err(Error::ProfileLoad("need to load profiles".to_string()));
        }

        let mut languages: Vec<String> = Vec::with_capacity(profiles.len());
        let mut word_lang_prob: HashMap<String, Vec<f64>> = HashMap::new();
        for (index, profile) in profiles.iter().enumerate() {
            if languages.contains(&profile.name) {
                return Err(Error::DuplicateProfile(profile.name.clone()));
            }
            languages.push(profile.name.clone());

            for (gram, count) in &profile.freq {
                let len = gram.chars().count();
                if len == 0 || len > N_GRAM || profile.n_words[len - 1] == 0 {
                    continue;
                }
                let probs = word_lang_prob
                    .entry(gram.clone())
                    .or_insert_with(|| vec![0.0; profiles.len()]);
                probs[index] = *count as f64 / profile.n_words[len - 1] as f64;
            }
        }

        Ok(Self {
            tables: Arc::new(ModelTables {
                languages,
                word_lang_prob,
            }),
            seed: None,
        })
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed as u64);
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.tables.languages
    }
}

impl DetectorFactory for NgramFactory {
    type Detector = NgramDetector;

    fn create(&self, alpha: f64) -> NgramDetector {
        let rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        NgramDetector {
            tables: Arc::clone(&self.tables),
            text: String::new(),
            alpha,
            rng,
            verbose: false,
        }
    }
}

pub struct NgramDetector {
    tables: Arc<ModelTables>,
    text: String,
    alpha: f64,
    rng: ChaCha8Rng,
    verbose: bool,
}

impl NgramDetector {
    fn known_grams(&self) -> Vec<String> {
        ngram::extract(&self.text)
            .into_iter()
            .filter(|gram| self.tables.word_lang_prob.contains_key(gram))
            .collect()
    }

    fn detect_block(&mut self) -> Result<Vec<f64>> {
        let grams = self.known_grams();
        if grams.is_empty() {
            return Err(Error::NoFeatures);
        }

        let lang_count = self.tables.languages.len();
        let mut prob = vec![0.0; lang_count];
        for trial in 0..N_TRIAL {
            let mut trial_prob = vec![1.0 / lang_count as f64; lang_count];
            let alpha = self.alpha + self.next_gaussian() * ALPHA_WIDTH;

            let mut i = 0;
            loop {
                let gram = &grams[self.rng.random_range(0..grams.len())];
                self.update_lang_prob(&mut trial_prob, gram, alpha);
                if i % 5 == 0 {
                    let max = normalize_prob(&mut trial_prob);
                    if self.verbose {
                        debug!("trial {} step {}: {:?} {:?}", trial, i, gram, trial_prob);
                    }
                    if max > CONV_THRESHOLD || i >= ITERATION_LIMIT {
                        break;
                    }
                }
                i += 1;
            }

            for (total, p) in prob.iter_mut().zip(&trial_prob) {
                *total += p / N_TRIAL as f64;
            }
        }
        Ok(prob)
    }

    fn update_lang_prob(&self, prob: &mut [f64], gram: &str, alpha: f64) {
        let Some(lang_prob) = self.tables.word_lang_prob.get(gram) else {
            return;
        };
        let weight = alpha / BASE_FREQ;
        for (p, lp) in prob.iter_mut().zip(lang_prob) {
            *p *= weight + lp;
        }
    }

    /// Standard normal sample (Box-Muller).
    fn next_gaussian(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Scale `prob` to sum to one and return its maximum.
fn normalize_prob(prob: &mut [f64]) -> f64 {
    let sum: f64 = prob.iter().sum();
    if sum <= 0.0 {
        return 0.0;
    }
    let mut max = 0.0;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}

impl Detector for NgramDetector {
    fn append(&mut self, text: &str) {
        let room = MAX_TEXT_LENGTH.saturating_sub(self.text.chars().count());
        self.text.extend(text.chars().take(room));
    }

    fn set_verbose(&mut self) {
        self.verbose = true;
    }

    fn probabilities(&mut self) -> Result<Vec<Language>> {
        let prob = self.detect_block()?;
        let mut languages: Vec<Language> = self
            .tables
            .languages
            .iter()
            .zip(prob)
            .filter(|(_, p)| *p > PROB_THRESHOLD)
            .map(|(lang, p)| Language::new(lang.clone(), p))
            .collect();
        languages.sort_by(|a, b| b.prob.total_cmp(&a.prob));
        Ok(languages)
    }

    fn detect(&mut self) -> Result<String> {
        let languages = self.probabilities()?;
        Ok(languages
            .into_iter()
            .next()
            .map_or_else(|| UNKNOWN_LANG.to_string(), |l| l.lang))
    }
}
