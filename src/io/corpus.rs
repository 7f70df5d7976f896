//! Wikipedia abstract dumps used as profile-generation corpora.
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use crate::core::profile::LangProfile;
use crate::error::Result;

const ABSTRACT_TAG: &[u8] = b"abstract";

/// First entry of `dir` (by name) matching `<lang>wiki-*-abstract.xml*`.
pub fn locate_corpus_file(dir: &Path, lang: &str) -> Result<Option<PathBuf>> {
    let pattern = Regex::new(&format!(
        r"^{}wiki-.*-abstract\.xml.*$",
        regex::escape(lang)
    ))?;

    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(names
        .into_iter()
        .find(|name| pattern.is_match(name))
        .map(|name| dir.join(name)))
}

/// Feed the text of every `<abstract>` element into `profile`.
/// Returns the number of abstracts read.
pub fn read_abstracts(path: &Path, profile: &mut LangProfile) -> Result<usize> {
    let mut reader = Reader::from_file(path)?;
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut in_abstract = false;
    let mut count = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == ABSTRACT_TAG => {
                in_abstract = true;
                count += 1;
            }
            Event::End(ref e) if e.name().as_ref() == ABSTRACT_TAG => in_abstract = false,
            Event::Text(e) if in_abstract => {
                let text = e.unescape()?;
                profile.add_text(&text);
            }
            Event::CData(e) if in_abstract => {
                profile.add_text(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(count)
}
