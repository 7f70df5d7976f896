use tracing::warn;

use crate::core::params::{ALPHA_KEY, DEFAULT_PROFILE_DIR, DIRECTORY_KEY, SEED_KEY};
use crate::error::Result;
use crate::options::{OptionSpec, OptionTable, ParsedOptions};
use crate::types::Command;

/// Value flags understood by the `langdetect` binary.
///
/// | flag | key | default |
/// |------|-----|---------|
/// | `-d` | profile directory | `./` |
/// | `-a` | smoothing alpha | `0.5` |
/// | `-s` | random seed | unset |
pub const OPTION_SPECS: [OptionSpec; 3] = [
    OptionSpec::new("-d", DIRECTORY_KEY, Some(DEFAULT_PROFILE_DIR)),
    OptionSpec::new("-a", ALPHA_KEY, Some("0.5")),
    OptionSpec::new("-s", SEED_KEY, None),
];

pub fn option_table() -> OptionTable {
    OptionTable::new(OPTION_SPECS)
}

/// Parse raw arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<ParsedOptions>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    option_table().parse(args)
}

/// The command to run, first match wins when several are given.
pub fn select_command(options: &ParsedOptions) -> Option<Command> {
    let mut requested = Command::ALL
        .into_iter()
        .filter(|command| options.has_flag(command.flag()));
    let selected = requested.next()?;
    let ignored: Vec<&str> = requested.map(Command::flag).collect();
    if !ignored.is_empty() {
        warn!(
            "Multiple commands given; running {} and ignoring {}",
            selected.flag(),
            ignored.join(", ")
        );
    }
    Some(selected)
}
