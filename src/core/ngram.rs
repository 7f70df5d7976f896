//! Character n-gram extraction shared by profile generation and detection.
use std::collections::VecDeque;

/// Longest n-gram tracked by profiles and detectors.
pub const N_GRAM: usize = 3;

/// Letters are lower-cased; everything else collapses to a word separator.
pub fn normalize(ch: char) -> char {
    if ch.is_alphabetic() {
        ch.to_lowercase().next().unwrap_or(ch)
    } else {
        ' '
    }
}

/// Sliding window over the last [`N_GRAM`] normalised characters.
///
/// The window always starts with a space so that word-initial n-grams carry
/// a leading boundary marker (`" th"`), and it is reset at every word break.
#[derive(Debug, Clone)]
pub struct NGramWindow {
    chars: VecDeque<char>,
}

impl Default for NGramWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl NGramWindow {
    pub fn new() -> Self {
        Self {
            chars: VecDeque::from([' ']),
        }
    }

    pub fn push(&mut self, ch: char) {
        let ch = normalize(ch);
        if self.chars.back() == Some(&' ') {
            self.chars.clear();
            self.chars.push_back(' ');
            if ch == ' ' {
                return;
            }
        } else if self.chars.len() >= N_GRAM {
            self.chars.pop_front();
        }
        self.chars.push_back(ch);
    }

    /// The trailing n-gram of length `n`, if the window holds one.
    pub fn get(&self, n: usize) -> Option<String> {
        if n == 0 || n > N_GRAM || self.chars.len() < n {
            return None;
        }
        if n == 1 {
            let last = *self.chars.back()?;
            return (last != ' ').then(|| last.to_string());
        }
        Some(self.chars.iter().skip(self.chars.len() - n).collect())
    }
}

/// All 1..=[`N_GRAM`]-grams of `text`, in reading order.
pub fn extract(text: &str) -> Vec<String> {
    let mut window = NGramWindow::new();
    let mut grams = Vec::new();
    for ch in text.chars() {
        window.push(ch);
        grams.extend((1..=N_GRAM).filter_map(|n| window.get(n)));
    }
    grams
}
