//! Lenient text input. Malformed UTF-8 is replaced with U+FFFD instead of
//! failing the read, and `\n`, `\r\n` and a lone `\r` all end a line.
use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use crate::error::Result;

/// Whole file as text, with invalid sequences replaced.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Line iterator over a byte stream, decoding each line lossily.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let mut chunk = self.buf.as_slice();
                    if let Some(rest) = chunk.strip_suffix(b"\n") {
                        chunk = rest;
                    }
                    if let Some(rest) = chunk.strip_suffix(b"\r") {
                        chunk = rest;
                    }
                    self.pending.extend(
                        chunk
                            .split(|&b| b == b'\r')
                            .map(|piece| String::from_utf8_lossy(piece).into_owned()),
                    );
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
