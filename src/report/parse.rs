use super::ticket::related_task_url;
use crate::error::{ReportError, Result};
use crate::model::{CommitRecord, DateRange, ParseMode, COMMIT_DATE_FORMAT};
use chrono::DateTime;

const BINARY_MARKER: &str = "-";

/// A commit header plus the summed numstat lines that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub author: String,
    pub date: String,
    pub message: String,
    pub lines_added: u64,
    pub lines_deleted: u64,
}

impl ParsedCommit {
    pub fn into_record(self, repo: &str) -> CommitRecord {
        let related_task = related_task_url(&self.message);
        CommitRecord::new(
            repo,
            self.author,
            self.date,
            self.message,
            self.lines_added,
            self.lines_deleted,
            related_task,
        )
    }
}

/// Turns `git log --pretty=format:%an|%ad|%s --numstat --date=iso` output into commits.
pub struct LogParser {
    range: DateRange,
    mode: ParseMode,
}

impl LogParser {
    pub fn new(range: DateRange, mode: ParseMode) -> Self {
        Self { range, mode }
    }

    /// Commits inside the range, in log order.
    ///
    /// Chunks are split on blank lines only. git prints no blank line after a
    /// commit without stat lines (an empty or merge commit), so the header that
    /// follows it is read as a malformed stat line and that commit is lost.
    pub fn parse(&self, raw: &str) -> Result<Vec<ParsedCommit>> {
        let mut commits = Vec::new();
        for chunk in raw.split("\n\n") {
            match self.parse_chunk(chunk) {
                Ok(Some(commit)) => commits.push(commit),
                Ok(None) => {}
                Err(e) if self.mode == ParseMode::Lenient => {
                    tracing::warn!(error = %e, "skipping malformed commit");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(commits)
    }

    fn parse_chunk(&self, chunk: &str) -> Result<Option<ParsedCommit>> {
        let mut lines = chunk.trim().lines();
        let header = lines.next().unwrap_or("");

        let fields: Vec<&str> = header.splitn(3, '|').collect();
        let [author, date, message] = fields[..] else {
            return Ok(None);
        };

        let timestamp = DateTime::parse_from_str(date, COMMIT_DATE_FORMAT)
            .map_err(|e| ReportError::Parse(format!("Invalid commit date '{date}': {e}")))?;

        if !self.range.contains(&timestamp) {
            return Ok(None);
        }

        let (lines_added, lines_deleted) = sum_numstat(lines)?;

        Ok(Some(ParsedCommit {
            author: author.to_string(),
            date: date.to_string(),
            message: message.to_string(),
            lines_added,
            lines_deleted,
        }))
    }
}

/// Sum added/deleted counts over numstat lines, ignoring binary entries and
/// anything that is not `added<TAB>deleted<TAB>path`.
pub fn sum_numstat<'a, I>(lines: I) -> Result<(u64, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut added = 0u64;
    let mut deleted = 0u64;

    for line in lines {
        let parts: Vec<&str> = line.split('\t').collect();
        let [add, del, _path] = parts[..] else {
            continue;
        };
        if add == BINARY_MARKER || del == BINARY_MARKER {
            continue;
        }
        added += parse_count(add)?;
        deleted += parse_count(del)?;
    }

    Ok((added, deleted))
}

fn parse_count(field: &str) -> Result<u64> {
    field
        .parse::<u64>()
        .map_err(|e| ReportError::Parse(format!("Invalid line count '{field}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn january() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-31").unwrap()
    }

    fn strict() -> LogParser {
        LogParser::new(january(), ParseMode::Strict)
    }

    #[test]
    fn parses_single_commit() {
        let commits = strict()
            .parse("Alice|2024-01-05 10:00:00 +0000|Fix CU-99 bug\n3\t1\tfile.go")
            .unwrap();
        assert_eq!(commits.len(), 1);
        let record = commits.into_iter().next().unwrap().into_record("billing");
        assert_eq!(record.repo(), "billing");
        assert_eq!(record.author(), "Alice");
        assert_eq!(record.date(), "2024-01-05 10:00:00 +0000");
        assert_eq!(record.message(), "Fix CU-99 bug");
        assert_eq!(record.lines_added(), 3);
        assert_eq!(record.lines_deleted(), 1);
        assert_eq!(record.lines_changed(), 4);
        assert!(record.related_task().unwrap().ends_with("/t/99"));
    }

    #[test]
    fn sums_stats_across_files() {
        let raw = "Bob|2024-01-10 09:30:00 +0100|Refactor\n\
                   10\t2\tsrc/a.rs\n\
                   5\t7\tsrc/b.rs\n\
                   0\t1\tREADME.md";
        let commits = strict().parse(raw).unwrap();
        assert_eq!((commits[0].lines_added, commits[0].lines_deleted), (15, 10));
    }

    #[test]
    fn binary_stat_lines_contribute_nothing() {
        assert_eq!(sum_numstat(["-\t-\timage.png"]).unwrap(), (0, 0));
        assert_eq!(sum_numstat(["4\t-\tdata.bin", "2\t3\tmain.rs"]).unwrap(), (2, 3));
    }

    #[test]
    fn lines_without_three_fields_are_ignored() {
        let lines = ["garbage", "1\t2", "1\t2\tf\textra", "1\t1\tok"];
        assert_eq!(sum_numstat(lines).unwrap(), (1, 1));
    }

    #[test]
    fn message_keeps_extra_pipes() {
        let commits = strict()
            .parse("Carol|2024-01-02 12:00:00 +0000|feat: a | b | c")
            .unwrap();
        assert_eq!(commits[0].message, "feat: a | b | c");
    }

    #[test]
    fn chunks_without_three_header_fields_are_skipped() {
        let raw = "not a header\n1\t1\tx\n\n\
                   Dave|2024-01-03 08:00:00 +0000|Real commit\n2\t0\ty";
        let commits = strict().parse(raw).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].author, "Dave");
    }

    #[test]
    fn commit_without_stats_absorbs_the_next_header() {
        // No blank line follows "empty", so "two" is read as a stat line of that chunk.
        let raw = "A|2024-01-04 10:00:00 +0000|four\n1\t0\ta\n\n\
                   A|2024-01-03 10:00:00 +0000|empty\n\
                   A|2024-01-02 10:00:00 +0000|two\n2\t0\tb\n\n\
                   A|2024-01-01 10:00:00 +0000|one\n1\t0\tc";
        let commits = strict().parse(raw).unwrap();
        let summary: Vec<_> = commits
            .iter()
            .map(|c| (c.message.as_str(), c.lines_added))
            .collect();
        assert_eq!(summary, vec![("four", 1), ("empty", 2), ("one", 1)]);
    }

    #[test]
    fn empty_output_yields_no_commits() {
        assert!(strict().parse("").unwrap().is_empty());
    }

    #[test]
    fn commits_outside_range_are_dropped() {
        let raw = "A|2023-12-31 23:59:59 +0000|before\n1\t1\tx\n\n\
                   B|2024-01-31 23:59:59 +0000|last second\n1\t1\tx\n\n\
                   C|2024-02-01 00:00:00 +0000|after\n1\t1\tx";
        let commits = strict().parse(raw).unwrap();
        let authors: Vec<_> = commits.iter().map(|c| c.author.as_str()).collect();
        assert_eq!(authors, vec!["B"]);
    }

    #[test]
    fn bad_date_is_fatal_in_strict_mode() {
        let err = strict().parse("A|yesterday|msg\n1\t1\tx").unwrap_err();
        assert!(matches!(err, ReportError::Parse(_)));
    }

    #[test]
    fn bad_count_is_fatal_in_strict_mode() {
        let err = strict()
            .parse("A|2024-01-05 10:00:00 +0000|msg\nlots\t1\tx")
            .unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn bad_count_outside_range_is_never_inspected() {
        let commits = strict()
            .parse("A|2022-06-01 10:00:00 +0000|old\nlots\t1\tx")
            .unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn lenient_mode_skips_only_the_bad_commit() {
        let raw = "A|2024-01-05 10:00:00 +0000|bad\nlots\t1\tx\n\n\
                   B|not a date|worse\n\n\
                   C|2024-01-06 10:00:00 +0000|good\n2\t2\ty";
        let commits = LogParser::new(january(), ParseMode::Lenient).parse(raw).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "good");
    }
}
