#![doc = r#"
langdetect — a command-line harness for n-gram language identification.

The crate builds per-language n-gram profiles from Wikipedia abstract dumps,
detects the language of text files, and evaluates detection accuracy against
a labelled corpus. It powers the `langdetect` binary and can be embedded in
your own Rust applications.

Detection backends sit behind the traits in [`api`]; the crate ships one
([`NgramModel`]) that reads JSON profiles from a directory.

Detect the language of files
----------------------------
```rust,no_run
use std::path::Path;
use langdetect::{ModelLoader, NgramModel, detect_files};

fn main() -> langdetect::Result<()> {
    let factory = NgramModel.load(Path::new("profiles"), Some(42))?;
    let stdout = std::io::stdout();
    let report = detect_files(&factory, &["a.txt", "b.txt"], 0.5, false, &mut stdout.lock());
    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Batch evaluation
----------------
Batch files hold one `label<TAB>text` record per line. Lines without a tab
or with an empty label are skipped. The tally is cumulative over the files
of one run.

```rust,no_run
use std::path::Path;
use langdetect::{ModelLoader, NgramModel, batch_test};

fn main() -> langdetect::Result<()> {
    let factory = NgramModel.load(Path::new("profiles"), None)?;
    let mut out = Vec::new();
    let report = batch_test(&factory, &["test-en.tsv", "test-fr.tsv"], 0.5, false, &mut out);
    print!("{}", String::from_utf8_lossy(&out));
    println!("examples={} file errors={}", report.total_examples(), report.errors());
    Ok(())
}
```

The report arithmetic is available on its own:

```rust
use langdetect::ConfusionTally;

let mut tally = ConfusionTally::new();
for predicted in ["en", "en", "en", "fr"] {
    tally.record("en", predicted);
}
let summary = tally.summary();
assert_eq!(summary.labels[0].to_string(), "en (3/4=0.75): {en=3, fr=1}");
assert_eq!(summary.total_line(), "total: 3/4 = 0.750");
```

Option parsing
--------------
```rust
use langdetect::cli::{parse_args, select_command};
use langdetect::Command;

let options = parse_args(["--batchtest", "-a", "0.1", "test.tsv"]).unwrap();
assert_eq!(select_command(&options), Some(Command::BatchTest));
assert_eq!(options.get("alpha"), Some("0.1"));
assert_eq!(options.positional(), ["test.tsv"]);
```

Useful modules
--------------
- [`api`] — backend traits and the command-level entry points.
- [`options`] — the flag scanner.
- [`core`] — parameters, n-gram profiles, the bundled detector and the batch harness.
- [`io`] — profile files and corpus dumps.
- [`cli`] — the binary's dispatch and logging setup.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod options;
pub mod types;

// Curated public API surface
pub use crate::core::batch::{
    BatchHarness, BatchSummary, ConfusionTally, FileReport, LabelAccuracy, LabeledExample,
};
pub use crate::core::detector::{NgramDetector, NgramFactory, NgramModel};
pub use crate::core::params::DetectParams;
pub use crate::core::profile::LangProfile;
pub use error::{Error, Result};
pub use options::{OptionSpec, OptionTable, ParsedOptions};
pub use types::{Command, Language};

pub use api::{
    BatchReport, DetectReport, Detector, DetectorFactory, ModelLoader, ProfileGenerator,
    batch_test, detect_files,
};
