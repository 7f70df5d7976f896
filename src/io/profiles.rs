//! JSON profile files: one language per file in a profile directory.
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::profile::LangProfile;
use crate::error::{Error, Result};

pub fn read_profile(path: &Path) -> Result<LangProfile> {
    let file = File::open(path)?;
    let profile = serde_json::from_reader(BufReader::new(file))?;
    Ok(profile)
}

/// Read every regular file of `dir` as a profile, in file-name order.
pub fn read_profile_dir(dir: &Path) -> Result<Vec<LangProfile>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::ProfileLoad(format!("Not found profile directory {}: {e}", dir.display()))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            debug!("Loading profile {:?}", path);
            read_profile(path).map_err(|e| {
                Error::ProfileLoad(format!("profile format error in '{}': {e}", path.display()))
            })
        })
        .collect()
}

/// Write `profile` as `<dir>/<profile name>` and return the path.
pub fn write_profile(profile: &LangProfile, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&profile.name);
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, profile)?;
    writer.flush()?;
    Ok(path)
}
