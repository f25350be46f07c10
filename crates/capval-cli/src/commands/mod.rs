//! Subcommands and the flags they share

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use capval_core::logging_facility::Profile;
use capval_core::CapValConfig;
use clap::{Args, ValueEnum};

pub mod explain;
pub mod standalone;
pub mod validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Human,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn profile(self) -> Profile {
        match self {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for generated files (overrides the configuration)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Checker executable (overrides the configuration)
    #[arg(long, global = true)]
    pub checker: Option<PathBuf>,

    /// Run without asking for confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Write the files but do not run the checker
    #[arg(long, global = true)]
    pub no_check: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub log_format: LogFormat,
}

impl GlobalArgs {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> Result<CapValConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => CapValConfig::load(path)?,
            None => CapValConfig::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(checker) = &self.checker {
            config.checker = checker.clone();
        }
        Ok(config)
    }
}

/// Ask a yes/no question on stdout; anything but `y`/`yes` declines
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
