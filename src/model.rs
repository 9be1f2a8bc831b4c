use chrono::{DateTime, Days, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::error::{ReportError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const COMMIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One commit as it appears in the report.
///
/// `lines_changed` is derived from the added/deleted counts at construction
/// and cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename = "Commit", rename_all = "PascalCase")]
pub struct CommitRecord {
    repo: String,
    author: String,
    date: String,
    message: String,
    lines_changed: u64,
    lines_added: u64,
    lines_deleted: u64,
    #[serde(rename = "RelatedClickUpTask", skip_serializing_if = "Option::is_none")]
    related_task: Option<String>,
}

impl CommitRecord {
    pub fn new(
        repo: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        message: impl Into<String>,
        lines_added: u64,
        lines_deleted: u64,
        related_task: Option<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            author: author.into(),
            date: date.into(),
            message: message.into(),
            lines_changed: lines_added + lines_deleted,
            lines_added,
            lines_deleted,
            related_task,
        }
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// The commit date exactly as git printed it.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn lines_changed(&self) -> u64 {
        self.lines_changed
    }

    pub fn lines_added(&self) -> u64 {
        self.lines_added
    }

    pub fn lines_deleted(&self) -> u64 {
        self.lines_deleted
    }

    pub fn related_task(&self) -> Option<&str> {
        self.related_task.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename = "Commits")]
pub struct CommitReport {
    #[serde(rename = "Commit")]
    pub commits: Vec<CommitRecord>,
}

/// How the record parser reacts to a malformed commit date or stat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort the whole run on the first malformed record.
    #[default]
    Strict,
    /// Drop the malformed commit and keep going.
    Lenient,
}

/// Half-open window `[since, until)` where `until` is midnight after the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DateRange {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let until = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ReportError::InvalidDate(format!("End date out of range: {end}")))?;
        Ok(Self {
            since: Utc.from_utc_datetime(&start.and_time(chrono::NaiveTime::MIN)),
            until: Utc.from_utc_datetime(&until.and_time(chrono::NaiveTime::MIN)),
        })
    }

    /// Parse both bounds from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_day(start, "start")?;
        let end = parse_day(end, "end")?;
        Self::from_dates(start, end)
    }

    pub fn contains(&self, timestamp: &DateTime<FixedOffset>) -> bool {
        let ts = timestamp.with_timezone(&Utc);
        ts >= self.since && ts < self.until
    }
}

fn parse_day(input: &str, which: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|e| ReportError::InvalidDate(format!("Error parsing {which} date '{input}': {e}")))
}
