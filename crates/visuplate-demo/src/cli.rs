use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use visuplate::{MenuConfig, Recovery, WatchList, load_store};

use crate::error::{DemoError, Result};
use crate::render::OutputFormat;
use crate::session::{Session, Summary};

#[derive(Debug, Parser)]
#[command(
    name = "visuplate-demo",
    about = "Load a Visuplate menu and drive it from a command script",
    version
)]
pub struct Cli {
    /// Catalog JSON (array of menu items).
    #[arg(long)]
    pub catalog: PathBuf,

    /// Language dictionary JSON.
    #[arg(long)]
    pub languages: PathBuf,

    /// Menu configuration (`.toml` or `.json`).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Command script; read from stdin when absent.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Start in this language instead of the configured default.
    #[arg(long)]
    pub language: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run_from_env() -> Result<Summary> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, stdout.lock())
}

pub fn run<O: Write>(cli: Cli, out: O) -> Result<Summary> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MenuConfig::default(),
    };
    if let Some(language) = cli.language {
        config.default_language = language;
    }

    let store = load_store(&cli.catalog, &cli.languages, &config, WatchList::new())?;
    let mut session = Session::new(store, out, cli.format);

    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                DemoError::invalid(format!("cannot open script '{}': {err}", path.display()))
            })?;
            session.run(BufReader::new(file))?
        }
        None => session.run(io::stdin().lock())?,
    };
    Ok(summary)
}

/// Load `path`, falling back to defaults when the file is unusable.
fn load_config(path: &Path) -> Result<MenuConfig> {
    match MenuConfig::load(path) {
        Ok(config) => Ok(config),
        Err(err) => {
            let err = visuplate::Error::from(err);
            if err.recovery() != Recovery::UseDefaults {
                return Err(err.into());
            }
            tracing::warn!(
                target: "visuplate.demo",
                path = %path.display(),
                error_type = err.error_type(),
                error = %err,
                "config unusable, using defaults"
            );
            Ok(MenuConfig::default())
        }
    }
}
