use crate::error::{ReportError, Result};
use crate::model::{CommitRecord, CommitReport};
use console::style;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
pub const DEFAULT_OUTPUT: &str = "commits.xml";

/// Stable ascending sort on the raw ISO date text.
pub fn sort_by_date(commits: &mut [CommitRecord]) {
    commits.sort_by(|a, b| a.date().cmp(b.date()));
}

/// Render the full document, declaration included.
pub fn render_xml(report: &CommitReport) -> Result<String> {
    let mut buffer = String::from(XML_HEADER);
    let mut ser = quick_xml::se::Serializer::new(&mut buffer);
    ser.indent(' ', 4);
    report
        .serialize(ser)
        .map_err(|e| ReportError::Serialize(e.to_string()))?;
    Ok(buffer)
}

/// Render first, then write, so a serialization failure never leaves a partial file behind.
pub fn write_xml(report: &CommitReport, path: &Path) -> Result<()> {
    let document = render_xml(report)?;
    std::fs::write(path, document)?;
    Ok(())
}

pub fn output_summary(commits: &[CommitRecord], path: &Path) {
    println!("{}", style("Commit Report").bold());
    println!("{}", "─".repeat(50));

    let repos: HashSet<&str> = commits.iter().map(|c| c.repo()).collect();
    let authors: HashSet<&str> = commits.iter().map(|c| c.author()).collect();
    let added: u64 = commits.iter().map(|c| c.lines_added()).sum();
    let deleted: u64 = commits.iter().map(|c| c.lines_deleted()).sum();

    println!("Total commits: {}", style(commits.len()).cyan());
    println!("Repositories: {}", style(repos.len()).cyan());
    println!("Unique authors: {}", style(authors.len()).yellow());
    println!("Total lines added: {}", style(added).green());
    println!("Total lines deleted: {}", style(deleted).red());

    if let (Some(first), Some(last)) = (commits.first(), commits.last()) {
        println!(
            "Date range: {} to {}",
            style(first.date()).dim(),
            style(last.date()).dim()
        );
    }

    println!("\nCommits exported to {}", path.display());
}
