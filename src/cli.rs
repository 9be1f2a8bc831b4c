use crate::error::{ReportError, Result};
use crate::model::{DateRange, ParseMode};
use crate::report::{ReportOptions, DEFAULT_OUTPUT};
use crate::util::normalize_args;
use anyhow::Context;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "commit-report")]
#[command(about = "Aggregate commit history across local git repositories into an XML report")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Start date in YYYY-MM-DD format")]
    pub start: Option<String>,

    #[arg(long, help = "End date in YYYY-MM-DD format (inclusive)")]
    pub end: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Comma-separated list of repository paths")]
    pub repos: Vec<String>,

    #[arg(long, default_value = DEFAULT_OUTPUT, help = "Where to write the XML report")]
    pub output: PathBuf,

    #[arg(long, help = "Skip malformed commits instead of aborting")]
    pub lenient: bool,

    #[arg(long, default_value = "git", help = "Version control executable to invoke")]
    pub git: String,
}

impl Cli {
    /// Parse `std::env::args`, accepting `-start=` style flags as well as `--start=`.
    pub fn parse() -> Self {
        Self::parse_from_args(std::env::args_os())
    }

    pub fn parse_from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        <Self as Parser>::parse_from(normalize_args(args))
    }

    pub fn execute(self) -> anyhow::Result<()> {
        let options = self.into_options().context("Invalid arguments")?;
        crate::report::exec(options)
    }

    /// Validate presence of every required value and parse the date window.
    pub fn into_options(self) -> Result<ReportOptions> {
        let start = self.start.as_deref().unwrap_or("");
        let end = self.end.as_deref().unwrap_or("");
        // Only a wholly empty `-repos` is missing. Empty list entries mean the current directory.
        let repos_given = match self.repos.as_slice() {
            [] => false,
            [only] => !only.is_empty(),
            _ => true,
        };

        if start.is_empty() || end.is_empty() || !repos_given {
            return Err(ReportError::Usage(
                "start, end and repos are all required".to_string(),
            ));
        }

        let range = DateRange::parse(start, end)?;

        Ok(ReportOptions {
            range,
            repos: self.repos,
            output: self.output,
            mode: if self.lenient { ParseMode::Lenient } else { ParseMode::Strict },
            git: self.git,
        })
    }
}
