// Command line front-end of the skin-tone analyzer.
//
//     skin-tone-tools analyze [-v|-vv] [--config FILE.toml] IMAGE...
//     skin-tone-tools palettes
//     skin-tone-tools guide
//
// Results are printed as JSON on stdout, logs go to stderr.

use std::{env,
          fs,
          io::{self, Write},
          error::Error,
          path::{Path, PathBuf}};
use log::{info, LevelFilter};
use serde::Deserialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use skin_tone::{config::guess_content_type, AnalysisConfig, Analyzer,
                PaletteCatalog, UploadPolicy};

type Err = Box<dyn Error>;

/// Contents of the `--config` file; every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    analysis: AnalysisConfig,
    upload: UploadPolicy,
}

impl Settings {
    fn load(path: &Path) -> Result<Self, Err> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Ok(toml::from_str(&content)?)
    }
}

struct Args {
    command: String,
    verbosity: usize,
    config: Option<PathBuf>,
    images: Vec<PathBuf>,
}

fn usage() -> String {
    "usage: skin-tone-tools analyze [-v] [--config FILE] IMAGE...\n       \
     skin-tone-tools palettes | guide".to_string()
}

fn parse_args() -> Result<Args, Err> {
    let mut args = env::args().skip(1);
    let command = args.next().ok_or_else(usage)?;
    let mut parsed = Args { command, verbosity: 0, config: None, images: vec![] };
    while let Some(a) = args.next() {
        match a.as_str() {
            "-v" => parsed.verbosity += 1,
            "-vv" => parsed.verbosity += 2,
            "--config" => {
                let f = args.next().ok_or("--config requires a file")?;
                parsed.config = Some(PathBuf::from(f));
            }
            _ if a.starts_with('-') => return Err(format!("unknown option {a}").into()),
            _ => parsed.images.push(PathBuf::from(a)),
        }
    }
    Ok(parsed)
}

fn init_logging(verbosity: usize) -> Result<(), Err> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr,
                     ColorChoice::Auto)?;
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Err> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn analyze(settings: &Settings, images: &[PathBuf]) -> Result<(), Err> {
    if images.is_empty() { return Err(usage().into()) }
    let analyzer = Analyzer::new(settings.analysis.clone(),
                                 PaletteCatalog::standard())?;
    for path in images {
        let content_type = guess_content_type(path)
            .ok_or_else(|| format!("{}: unknown image type", path.display()))?;
        let bytes = fs::read(path)?;
        settings.upload.check(content_type, bytes.len())?;
        info!("analyzing {} ({} bytes)", path.display(), bytes.len());
        match analyzer.analyze(&bytes) {
            Ok(report) => print_json(&report)?,
            Err(e) if e.is_client_error() => {
                return Err(format!("{}: {e}", path.display()).into())
            }
            Err(e) => {
                log::error!("internal error at {:?} stage: {e}", e.stage());
                return Err(e.into())
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Err> {
    let args = parse_args()?;
    init_logging(args.verbosity)?;
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    match args.command.as_str() {
        "analyze" => analyze(&settings, &args.images),
        "palettes" => print_json(&PaletteCatalog::standard().all_palettes()),
        "guide" => print_json(&skin_tone::guide::guide()),
        _ => Err(usage().into()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings() {
        let s: Settings = toml::from_str(
            "[analysis.classify]\nclusters = 3\n\n[upload]\nmax_bytes = 1024\n")
            .unwrap();
        assert_eq!(s.analysis.classify.clusters, 3);
        assert_eq!(s.analysis.classify.fallback_penalty, 0.6);
        assert_eq!(s.upload.max_bytes, 1024);
        assert_eq!(s.upload.allowed_types.len(), 3);
    }

    #[test]
    fn bounds_in_toml() {
        let s: Settings = toml::from_str(
            "[analysis.preprocess]\nskin_cr = { min = 135.0, max = 170.0 }\n")
            .unwrap();
        assert_eq!(s.analysis.preprocess.skin_cr.min, 135.);
        assert_eq!(s.analysis.preprocess.max_dimension, 512);
    }
}
