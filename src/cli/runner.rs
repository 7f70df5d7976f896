use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::api::{self, ModelLoader, ProfileGenerator};
use crate::core::detector::NgramModel;
use crate::core::params::{DEBUG_FLAG, DetectParams};
use crate::options::ParsedOptions;
use crate::types::Command;

use super::args::{parse_args, select_command};
use super::errors::AppError;

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse the command line and install logging at the level it asks for.
/// A parse error is logged at the default level before it is returned.
pub fn start<I, S>(args: I) -> Result<ParsedOptions, AppError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match parse_args(args) {
        Ok(options) => {
            init_logging(options.has_flag(DEBUG_FLAG));
            Ok(options)
        }
        Err(e) => {
            init_logging(false);
            let err = AppError::Options(e);
            error!("{err}");
            Err(err)
        }
    }
}

/// Run the selected command with the bundled n-gram backend, writing
/// results to stdout and profiles to the current directory.
pub fn run(options: &ParsedOptions) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(options, &NgramModel, Path::new("."), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run the command selected by `options` against `backend`.
///
/// Returns the command that ran, or `None` when no command flag was given.
pub fn dispatch<B, W>(
    options: &ParsedOptions,
    backend: &B,
    output_dir: &Path,
    out: &mut W,
) -> Result<Option<Command>, AppError>
where
    B: ModelLoader + ProfileGenerator,
    W: Write,
{
    let Some(command) = select_command(options) else {
        debug!("No command given; nothing to do");
        return Ok(None);
    };

    let params = DetectParams::from_options(options);
    debug!("Running {} with {:?}", command, params);

    match command {
        Command::GenerateProfile => generate_profile(backend, options.positional(), output_dir)?,
        Command::DetectLanguage => detect_lang(backend, &params, options.positional(), out)?,
        Command::BatchTest => batch_test(backend, &params, options.positional(), out)?,
    }
    Ok(Some(command))
}

/// Every detection command loads profiles first and stops if that fails.
fn load_profiles<B: ModelLoader>(
    backend: &B,
    params: &DetectParams,
) -> Result<B::Factory, AppError> {
    backend
        .load(&params.profile_dir, params.seed)
        .map_err(AppError::ModelLoad)
}

fn generate_profile<B: ProfileGenerator>(
    backend: &B,
    positional: &[String],
    output_dir: &Path,
) -> Result<(), AppError> {
    let corpus_dir = positional.first().ok_or(AppError::MissingArgument {
        arg: "corpus directory".to_string(),
    })?;
    let lang = positional.get(1).ok_or(AppError::MissingArgument {
        arg: "language name".to_string(),
    })?;

    let path = backend
        .generate(Path::new(corpus_dir), lang, output_dir)
        .map_err(AppError::GenerateProfile)?;
    info!("Profile {} written to {:?}", lang, path);
    Ok(())
}

fn detect_lang<B: ModelLoader, W: Write>(
    backend: &B,
    params: &DetectParams,
    files: &[String],
    out: &mut W,
) -> Result<(), AppError> {
    let factory = load_profiles(backend, params)?;
    let report = api::detect_files(&factory, files, params.alpha, params.debug, out);
    info!(
        "Detection complete: {} processed, {} errors",
        report.processed, report.errors
    );
    Ok(())
}

fn batch_test<B: ModelLoader, W: Write>(
    backend: &B,
    params: &DetectParams,
    files: &[String],
    out: &mut W,
) -> Result<(), AppError> {
    let factory = load_profiles(backend, params)?;
    let report = api::batch_test(&factory, files, params.alpha, params.debug, out);
    if report.total_examples() == 0 {
        return Err(AppError::NoExamples);
    }
    Ok(())
}
