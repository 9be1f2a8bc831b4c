use super::{output_summary, sort_by_date, write_xml, LogParser, SeenMessages};
use crate::error::Result;
use crate::git::GitRepo;
use crate::model::{CommitRecord, CommitReport, DateRange, ParseMode};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Everything one run needs, already validated.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub range: DateRange,
    pub repos: Vec<String>,
    pub output: PathBuf,
    pub mode: ParseMode,
    pub git: String,
}

pub fn exec(options: ReportOptions) -> anyhow::Result<()> {
    let commits = collect_commits(&options).context("Failed to collect commits")?;

    let report = CommitReport { commits };
    write_xml(&report, &options.output)
        .with_context(|| format!("Failed to write {}", options.output.display()))?;

    output_summary(&report.commits, &options.output);
    Ok(())
}

/// Pool, deduplicate and sort commits from every repository in `options.repos`.
///
/// Repositories whose path cannot be resolved or whose log cannot be read are
/// logged and skipped. Malformed log records abort the run in strict mode.
pub fn collect_commits(options: &ReportOptions) -> Result<Vec<CommitRecord>> {
    let parser = LogParser::new(options.range, options.mode);
    let mut seen = SeenMessages::new();
    let mut commits = Vec::new();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    for path in &options.repos {
        pb.set_message(format!("Reading {path}"));

        let fetched = GitRepo::resolve(path).and_then(|repo| {
            let raw = repo.log(&options.git)?;
            Ok((repo, raw))
        });
        let (repo, raw) = match fetched {
            Ok(fetched) => fetched,
            Err(e) if e.is_per_repository() => {
                pb.suspend(|| tracing::error!(repo = %path, error = %e, "skipping repository"));
                continue;
            }
            Err(e) => return Err(e),
        };

        let parsed = parser.parse(&raw).inspect_err(|e| {
            pb.suspend(|| tracing::error!(repo = %repo.name(), error = %e, "malformed git log"));
        })?;

        let before = commits.len();
        let total = parsed.len();
        for commit in parsed {
            if seen.first_sighting(repo.name(), &commit.message) {
                commits.push(commit.into_record(repo.name()));
            }
        }
        tracing::debug!(
            repo = %repo.name(),
            path = %repo.path().display(),
            in_range = total,
            kept = commits.len() - before,
            "processed repository"
        );

        pb.inc(1);
    }

    pb.finish_and_clear();

    sort_by_date(&mut commits);
    tracing::info!(commits = commits.len(), repos = options.repos.len(), "collected commits");
    Ok(commits)
}
